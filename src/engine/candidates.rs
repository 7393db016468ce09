use crate::geometry::{Orientation, Plane, Point};

/// Bijection between `(row, col, orientation)` and `[0, rows * cols * 4)`.
///
/// `idx = (col * rows + row) * 4 + orientation`. Replay determinism relies on
/// this mapping staying fixed, so nothing else in the crate computes indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSpace {
    rows: i32,
    cols: i32,
}

impl CandidateSpace {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize * Orientation::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// None when the head lies outside the grid.
    #[inline(always)]
    pub fn index_of(&self, plane: Plane) -> Option<usize> {
        if !plane.head().is_inside(self.rows, self.cols) {
            return None;
        }
        let cell = (plane.col * self.rows + plane.row) as usize;
        Some(cell * Orientation::COUNT + plane.orientation.index())
    }

    #[inline(always)]
    pub fn plane_at(&self, idx: usize) -> Plane {
        let orientation = Orientation::ALL[idx % Orientation::COUNT];
        Plane::at(self.head_at(idx), orientation)
    }

    #[inline(always)]
    pub fn head_at(&self, idx: usize) -> Point {
        let cell = (idx / Orientation::COUNT) as i32;
        Point::new(cell % self.rows, cell / self.rows)
    }

    /// The four candidate indices headed at `p`, or None off the grid.
    pub fn heads_at(&self, p: Point) -> Option<[usize; Orientation::COUNT]> {
        let first = self.index_of(Plane::at(p, Orientation::NorthSouth))?;
        Some([first, first + 1, first + 2, first + 3])
    }
}
