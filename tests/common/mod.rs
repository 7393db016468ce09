#![allow(dead_code)]

use planeforge::config::SelectorWeights;
use planeforge::engine::{Engine, GuessPoint, Outcome};
use planeforge::geometry::{Footprint, Orientation, Plane, Point};

/// Builder for Engine to keep test setup short
pub struct EngineBuilder {
    rows: i32,
    cols: i32,
    planes: usize,
    footprint: Footprint,
    weights: SelectorWeights,
    seed: u64,
}

impl EngineBuilder {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            planes: 1,
            footprint: Footprint::classic(),
            weights: SelectorWeights::default(),
            seed: 42,
        }
    }

    pub fn planes(mut self, planes: usize) -> Self {
        self.planes = planes;
        self
    }

    pub fn shape(mut self, shape: &str) -> Self {
        self.footprint = Footprint::parse(shape).expect("valid test shape");
        self
    }

    pub fn footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn weights(mut self, head_all: u32, completion_all: u32, head_pair: u32) -> Self {
        self.weights = SelectorWeights {
            mix_head_all: head_all,
            mix_completion_all: completion_all,
            mix_head_pair: head_pair,
        };
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Engine {
        Engine::new(
            self.rows,
            self.cols,
            self.planes,
            self.footprint,
            self.weights,
            Some(self.seed),
        )
        .expect("valid test engine")
    }
}

/// Head plus the cell below, the cell below that, and one to the lower right.
pub const L_SHAPE: &str = "1:0;2:0;1:1";

/// Head plus one cell below.
pub const DOMINO: &str = "1:0";

pub fn probe(engine: &mut Engine, row: i32, col: i32, outcome: Outcome) -> Vec<Plane> {
    engine
        .submit(GuessPoint::new(row, col, outcome))
        .expect("probe inside the grid")
}

/// Probes the head, then every body cell of `plane` as a hit.
/// Returns the planes confirmed along the way.
pub fn reveal_plane(engine: &mut Engine, plane: Plane) -> Vec<Plane> {
    let cells: Vec<Point> = engine.footprint().cells(plane).collect();
    let mut confirmed = probe(engine, plane.row, plane.col, Outcome::Dead);
    for p in cells.into_iter().skip(1) {
        confirmed.extend(probe(engine, p.row, p.col, Outcome::Hit));
    }
    confirmed
}

pub fn center_plane() -> Plane {
    Plane::new(4, 4, Orientation::NorthSouth)
}
