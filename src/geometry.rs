pub mod intersect;

pub use self::intersect::PlanesThrough;

use crate::error::{PfResult, PlaneForgeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// A grid cell. Rows grow downwards, columns grow to the right.
/// Coordinates are signed so that translations may step off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub fn is_inside(&self, rows: i32, cols: i32) -> bool {
        self.row >= 0 && self.row < rows && self.col >= 0 && self.col < cols
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four rotations of a footprint. The discriminant is the candidate
/// index tag and must not be reordered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    NorthSouth = 0,
    SouthNorth = 1,
    WestEast = 2,
    EastWest = 3,
}

impl Orientation {
    pub const COUNT: usize = 4;
    pub const ALL: [Orientation; 4] = [
        Self::NorthSouth,
        Self::SouthNorth,
        Self::WestEast,
        Self::EastWest,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::NorthSouth),
            1 => Some(Self::SouthNorth),
            2 => Some(Self::WestEast),
            3 => Some(Self::EastWest),
            _ => None,
        }
    }

    /// Quarter turn clockwise on screen (rows down, columns right).
    pub fn rotated_clockwise(self) -> Self {
        match self {
            Self::NorthSouth => Self::EastWest,
            Self::EastWest => Self::SouthNorth,
            Self::SouthNorth => Self::WestEast,
            Self::WestEast => Self::NorthSouth,
        }
    }

    /// Maps an orientation-0 offset into this orientation.
    #[inline(always)]
    pub fn apply(self, offset: Point) -> Point {
        let Point { row: dr, col: dc } = offset;
        match self {
            Self::NorthSouth => Point::new(dr, dc),
            Self::SouthNorth => Point::new(-dr, -dc),
            Self::WestEast => Point::new(-dc, dr),
            Self::EastWest => Point::new(dc, -dr),
        }
    }
}

/// A placed plane. The footprint is derived from a [`Footprint`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plane {
    pub row: i32,
    pub col: i32,
    pub orientation: Orientation,
}

impl Plane {
    pub const fn new(row: i32, col: i32, orientation: Orientation) -> Self {
        Self {
            row,
            col,
            orientation,
        }
    }

    pub fn at(head: Point, orientation: Orientation) -> Self {
        Self::new(head.row, head.col, orientation)
    }

    #[inline(always)]
    pub fn head(&self) -> Point {
        Point::new(self.row, self.col)
    }

    pub fn is_head(&self, p: Point) -> bool {
        self.head() == p
    }

    pub fn contains_point(&self, p: Point, footprint: &Footprint) -> bool {
        footprint.contains_point(*self, p)
    }

    pub fn is_position_valid(&self, rows: i32, cols: i32, footprint: &Footprint) -> bool {
        footprint.fits(*self, rows, cols)
    }

    pub fn translated(&self, offset: Point) -> Plane {
        *self + offset
    }

    pub fn rotate(&mut self) {
        self.orientation = self.orientation.rotated_clockwise();
    }

    /// Moves the head by the offset only if the new head stays on the grid.
    /// Returns whether the plane moved.
    pub fn translate_when_head_valid(&mut self, dr: i32, dc: i32, rows: i32, cols: i32) -> bool {
        let target = self.head() + Point::new(dr, dc);
        if !target.is_inside(rows, cols) {
            return false;
        }
        self.row = target.row;
        self.col = target.col;
        true
    }
}

impl Add<Point> for Plane {
    type Output = Plane;
    fn add(self, offset: Point) -> Plane {
        Plane::at(self.head() + offset, self.orientation)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.head(), self.orientation)
    }
}

/// The shape of a plane, stored as orientation-0 offsets relative to the head.
/// The head offset (0,0) is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    rotated: [Vec<Point>; Orientation::COUNT],
}

impl Default for Footprint {
    fn default() -> Self {
        Self::classic()
    }
}

impl Footprint {
    /// Head, a five cell wing row, one body cell and a three cell tail.
    pub fn classic() -> Self {
        let offsets = [
            (0, 0),
            (1, -2),
            (1, -1),
            (1, 0),
            (1, 1),
            (1, 2),
            (2, 0),
            (3, -1),
            (3, 0),
            (3, 1),
        ];
        Self::build(offsets.iter().map(|&(r, c)| Point::new(r, c)).collect())
    }

    /// Builds a footprint from orientation-0 offsets. The head must come first.
    pub fn new(offsets: Vec<Point>) -> PfResult<Self> {
        match offsets.first() {
            None => {
                return Err(PlaneForgeError::Validation(
                    "Footprint must contain at least the head".to_string(),
                ))
            }
            Some(head) if *head != Point::default() => {
                return Err(PlaneForgeError::Validation(format!(
                    "Footprint must start with the head offset (0, 0), found {}",
                    head
                )))
            }
            _ => {}
        }

        for (i, a) in offsets.iter().enumerate() {
            if offsets[i + 1..].contains(a) {
                return Err(PlaneForgeError::Validation(format!(
                    "Footprint offset {} appears twice",
                    a
                )));
            }
        }

        Ok(Self::build(offsets))
    }

    /// Parses `"dr:dc;dr:dc;..."` body offsets. The head is implied.
    /// An empty string yields the classic plane.
    pub fn parse(s: &str) -> PfResult<Self> {
        if s.trim().is_empty() {
            return Ok(Self::classic());
        }

        let mut offsets = vec![Point::default()];
        for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (r, c) = part.split_once(':').ok_or_else(|| {
                PlaneForgeError::Config(format!("Shape cell '{}' is not 'row:col'", part))
            })?;
            let parse = |v: &str| {
                v.trim().parse::<i32>().map_err(|_| {
                    PlaneForgeError::Config(format!("Invalid number in shape cell '{}'", part))
                })
            };
            offsets.push(Point::new(parse(r)?, parse(c)?));
        }
        Self::new(offsets)
    }

    fn build(offsets: Vec<Point>) -> Self {
        let rotated = Orientation::ALL.map(|o| offsets.iter().map(|&off| o.apply(off)).collect());
        Self { rotated }
    }

    /// Number of cells, head included.
    pub fn len(&self) -> usize {
        self.rotated[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotated[0].is_empty()
    }

    pub fn offsets(&self, orientation: Orientation) -> &[Point] {
        &self.rotated[orientation.index()]
    }

    /// Occupied cells of a plane, head first.
    pub fn cells(&self, plane: Plane) -> impl Iterator<Item = Point> + '_ {
        let head = plane.head();
        self.offsets(plane.orientation)
            .iter()
            .map(move |&off| head + off)
    }

    /// Occupied cells without the head.
    pub fn body(&self, plane: Plane) -> impl Iterator<Item = Point> + '_ {
        self.cells(plane).skip(1)
    }

    pub fn contains_point(&self, plane: Plane, p: Point) -> bool {
        self.cells(plane).any(|c| c == p)
    }

    /// True when the whole plane lies inside a `rows` x `cols` grid.
    pub fn fits(&self, plane: Plane, rows: i32, cols: i32) -> bool {
        self.cells(plane).all(|c| c.is_inside(rows, cols))
    }

    /// Every plane (on or off any grid) whose footprint covers `p`.
    pub fn planes_through(&self, p: Point) -> PlanesThrough<'_> {
        PlanesThrough::new(self, p)
    }

    pub fn overlaps(&self, a: Plane, b: Plane) -> bool {
        self.cells(a).any(|c| self.contains_point(b, c))
    }
}

pub fn all_orientations() -> impl Iterator<Item = Orientation> {
    Orientation::iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycle_returns_home() {
        for o in all_orientations() {
            let back = o
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise();
            assert_eq!(o, back);
        }
    }

    #[test]
    fn test_rotation_matches_offsets() {
        // A clockwise quarter turn of "down" is "left".
        let down = Point::new(1, 0);
        let o = Orientation::NorthSouth;
        assert_eq!(o.apply(down), down);
        assert_eq!(o.rotated_clockwise().apply(down), Point::new(0, -1));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        assert!(Footprint::parse("1:0;1:0").is_err());
        assert!(Footprint::parse("0:0").is_err());
        assert!(Footprint::parse("1;0").is_err());
    }
}
