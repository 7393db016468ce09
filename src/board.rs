use crate::engine::{GuessPoint, Outcome};
use crate::error::{PfResult, PlaneForgeError};
use crate::geometry::{Footprint, Orientation, Plane, Point};
use fastrand::Rng;
use tracing::debug;

const PLACEMENT_ATTEMPTS: usize = 2_000;
const PLACEMENT_RESTARTS: usize = 50;

/// A grid of hidden planes the engine probes against.
pub trait PlaneSource {
    fn rows(&self) -> i32;
    fn cols(&self) -> i32;
    fn plane_count(&self) -> usize;
    fn plane(&self, idx: usize) -> Option<Plane>;
    fn probe(&self, p: Point) -> Outcome;
}

/// Receives every probe result the engine produced, e.g. for display.
pub trait ProbeSink {
    fn record(&mut self, gp: GuessPoint);
}

impl ProbeSink for Vec<GuessPoint> {
    fn record(&mut self, gp: GuessPoint) {
        self.push(gp);
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    cols: i32,
    footprint: Footprint,
    planes: Vec<Plane>,
}

impl Board {
    /// Validates a manual placement: every plane on the grid, none overlapping.
    pub fn with_planes(
        rows: i32,
        cols: i32,
        footprint: Footprint,
        planes: Vec<Plane>,
    ) -> PfResult<Self> {
        for (i, &pl) in planes.iter().enumerate() {
            if !footprint.fits(pl, rows, cols) {
                return Err(PlaneForgeError::Placement(format!(
                    "Plane {} at {} does not fit a {}x{} grid",
                    i, pl, rows, cols
                )));
            }
            if let Some(other) = planes[..i].iter().find(|&&o| footprint.overlaps(o, pl)) {
                return Err(PlaneForgeError::Placement(format!(
                    "Plane {} at {} overlaps plane at {}",
                    i, pl, other
                )));
            }
        }

        Ok(Self {
            rows,
            cols,
            footprint,
            planes,
        })
    }

    /// Places `count` non-overlapping planes by rejection sampling.
    pub fn random(
        rows: i32,
        cols: i32,
        count: usize,
        footprint: Footprint,
        rng: &mut Rng,
    ) -> PfResult<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(PlaneForgeError::Config(format!(
                "Grid must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }

        for restart in 0..PLACEMENT_RESTARTS {
            if let Some(planes) = try_place(rows, cols, count, &footprint, rng) {
                if restart > 0 {
                    debug!("Board placed after {} restarts", restart);
                }
                return Ok(Self {
                    rows,
                    cols,
                    footprint,
                    planes,
                });
            }
        }

        Err(PlaneForgeError::Placement(format!(
            "Could not fit {} planes of {} cells on a {}x{} grid",
            count,
            footprint.len(),
            rows,
            cols
        )))
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// The plane occupying `p` and whether `p` is its head.
    pub fn plane_at(&self, p: Point) -> Option<(usize, bool)> {
        self.planes
            .iter()
            .enumerate()
            .find(|(_, pl)| self.footprint.contains_point(**pl, p))
            .map(|(i, pl)| (i, pl.is_head(p)))
    }
}

fn try_place(
    rows: i32,
    cols: i32,
    count: usize,
    footprint: &Footprint,
    rng: &mut Rng,
) -> Option<Vec<Plane>> {
    let mut placed: Vec<Plane> = Vec::with_capacity(count);

    for _ in 0..count {
        let found = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
            let candidate = Plane::new(
                rng.i32(0..rows),
                rng.i32(0..cols),
                Orientation::ALL[rng.usize(0..Orientation::COUNT)],
            );
            let free = footprint.fits(candidate, rows, cols)
                && !placed.iter().any(|&o| footprint.overlaps(o, candidate));
            free.then_some(candidate)
        })?;
        placed.push(found);
    }
    Some(placed)
}

impl PlaneSource for Board {
    fn rows(&self) -> i32 {
        self.rows
    }

    fn cols(&self) -> i32 {
        self.cols
    }

    fn plane_count(&self) -> usize {
        self.planes.len()
    }

    fn plane(&self, idx: usize) -> Option<Plane> {
        self.planes.get(idx).copied()
    }

    fn probe(&self, p: Point) -> Outcome {
        match self.plane_at(p) {
            Some((_, true)) => Outcome::Dead,
            Some((_, false)) => Outcome::Hit,
            None => Outcome::Miss,
        }
    }
}
