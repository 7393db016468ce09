use super::candidates::CandidateSpace;
use super::types::{GuessPoint, Outcome};
use crate::geometry::{Footprint, Plane, Point};
use tracing::debug;

/// Belief about one candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Impossible: off-grid, or covers a miss.
    Eliminated,
    /// The head cell was already probed.
    Consumed,
    /// Accumulated hit evidence consistent with this placement.
    Heat(u32),
}

impl Choice {
    /// The integer encoding: -1 eliminated, -2 consumed, score otherwise.
    #[inline(always)]
    pub fn raw(self) -> i64 {
        match self {
            Choice::Eliminated => -1,
            Choice::Consumed => -2,
            Choice::Heat(n) => n as i64,
        }
    }

    #[inline(always)]
    pub fn is_viable(self) -> bool {
        matches!(self, Choice::Heat(_))
    }
}

/// Scored array over the whole candidate space.
///
/// Once an entry leaves `Heat` it never returns to it, and heat only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceMap {
    space: CandidateSpace,
    cells: Vec<Choice>,
}

impl ChoiceMap {
    pub fn new(space: CandidateSpace, footprint: &Footprint) -> Self {
        let mut map = Self {
            space,
            cells: Vec::with_capacity(space.len()),
        };
        map.reset(footprint);
        map
    }

    /// Every placement fully inside the grid starts at zero heat.
    pub fn reset(&mut self, footprint: &Footprint) {
        let (rows, cols) = (self.space.rows(), self.space.cols());
        let space = self.space;
        self.cells.clear();
        self.cells.extend((0..space.len()).map(|idx| {
            if footprint.fits(space.plane_at(idx), rows, cols) {
                Choice::Heat(0)
            } else {
                Choice::Eliminated
            }
        }));
    }

    pub fn space(&self) -> CandidateSpace {
        self.space
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> Choice {
        self.cells[idx]
    }

    /// None for planes headed off the grid.
    pub fn get_plane(&self, plane: Plane) -> Option<Choice> {
        self.space.index_of(plane).map(|idx| self.cells[idx])
    }

    pub fn as_slice(&self) -> &[Choice] {
        &self.cells
    }

    /// Integer view, mainly for snapshots and diagnostics.
    pub fn raw_scores(&self) -> Vec<i64> {
        self.cells.iter().map(|c| c.raw()).collect()
    }

    pub fn viable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_viable()).count()
    }

    /// Folds a single probe result into the map.
    pub fn apply(&mut self, gp: &GuessPoint, footprint: &Footprint) {
        let p = gp.point();
        self.consume_head(p);

        match gp.outcome {
            Outcome::Hit => self.record_hit(p, footprint),
            // Dead eliminates like a miss. Sound only while planes never overlap.
            Outcome::Miss | Outcome::Dead => self.record_miss(p, footprint),
        }
    }

    /// Replays a resolved plane's body as misses and returns them so the
    /// caller can append them to its evidence log.
    pub fn explain_plane(&mut self, plane: Plane, footprint: &Footprint) -> Vec<GuessPoint> {
        let synthetic: Vec<GuessPoint> = footprint
            .body(plane)
            .map(|p| GuessPoint::at(p, Outcome::Miss))
            .collect();

        for gp in &synthetic {
            self.apply(gp, footprint);
        }
        debug!(
            "Explained {} with {} synthetic misses ({} candidates viable)",
            plane,
            synthetic.len(),
            self.viable_count()
        );
        synthetic
    }

    /// Number of viable placements through `p` not headed at `p`.
    /// None when no placement headed at `p` is viable any more.
    pub fn influence(&self, p: Point, footprint: &Footprint) -> Option<usize> {
        let heads = self.space.heads_at(p)?;
        if !heads.iter().any(|&idx| self.cells[idx].is_viable()) {
            return None;
        }

        let count = footprint
            .planes_through(p)
            .filter(|pl| !pl.is_head(p))
            .filter_map(|pl| self.space.index_of(pl))
            .filter(|&idx| self.cells[idx].is_viable())
            .count();
        Some(count)
    }

    fn consume_head(&mut self, p: Point) {
        if let Some(heads) = self.space.heads_at(p) {
            for idx in heads {
                self.cells[idx] = Choice::Consumed;
            }
        }
    }

    // Placements that do not fit the grid were eliminated at reset and can
    // never become viable again, so viability alone filters them out.
    fn record_hit(&mut self, p: Point, footprint: &Footprint) {
        for pl in footprint.planes_through(p) {
            if pl.is_head(p) {
                continue;
            }
            if let Some(idx) = self.space.index_of(pl) {
                if let Choice::Heat(n) = self.cells[idx] {
                    self.cells[idx] = Choice::Heat(n + 1);
                }
            }
        }
    }

    fn record_miss(&mut self, p: Point, footprint: &Footprint) {
        for pl in footprint.planes_through(p) {
            if let Some(idx) = self.space.index_of(pl) {
                if self.cells[idx].is_viable() {
                    self.cells[idx] = Choice::Eliminated;
                }
            }
        }
    }
}
