use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// What a probe revealed about a cell.
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
pub enum Outcome {
    Hit,
    Miss,
    /// The cell is the head of some plane.
    Dead,
}

/// A probe result. Outcomes are permanent facts about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuessPoint {
    pub row: i32,
    pub col: i32,
    pub outcome: Outcome,
}

impl GuessPoint {
    pub const fn new(row: i32, col: i32, outcome: Outcome) -> Self {
        Self { row, col, outcome }
    }

    pub fn at(p: Point, outcome: Outcome) -> Self {
        Self::new(p.row, p.col, outcome)
    }

    #[inline(always)]
    pub fn point(&self) -> Point {
        Point::new(self.row, self.col)
    }

    pub fn is_dead(&self) -> bool {
        self.outcome == Outcome::Dead
    }
}
