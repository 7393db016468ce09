pub mod candidates;
pub mod choice_map;
pub mod head_data;
pub mod history;
pub mod selector;
pub mod types;

pub use self::candidates::CandidateSpace;
pub use self::choice_map::{Choice, ChoiceMap};
pub use self::head_data::{HeadData, OrientationHypothesis};
pub use self::history::ReplayEngine;
pub use self::selector::{Move, MoveSelector, Strategy};
pub use self::types::{GuessPoint, Outcome};

use crate::config::{Config, SelectorWeights};
use crate::error::{PfResult, PlaneForgeError};
use crate::geometry::{Footprint, Orientation, Plane, Point};
use fastrand::Rng;
use tracing::{debug, info, warn};

/// The opponent's inference engine.
///
/// Owns the choice map, the active head records and the confirmed planes.
/// Callers interact only through probes, move requests and the read-only views.
pub struct Engine {
    rows: i32,
    cols: i32,
    plane_count: usize,
    footprint: Footprint,

    choices: ChoiceMap,
    heads: Vec<HeadData>,
    confirmed: Vec<Plane>,

    // Genuine probes in submission order.
    guesses: Vec<GuessPoint>,
    // Probes plus the synthetic misses of every confirmed plane. Append-only;
    // replayed into each new head record.
    evidence: Vec<GuessPoint>,
    probed: Vec<Option<Outcome>>,

    selector: MoveSelector,
    rng: Rng,
}

impl Engine {
    pub fn new(
        rows: i32,
        cols: i32,
        plane_count: usize,
        footprint: Footprint,
        weights: SelectorWeights,
        seed: Option<u64>,
    ) -> PfResult<Self> {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self::with_rng(rows, cols, plane_count, footprint, weights, rng)
    }

    /// Builds an engine around an injected random source.
    pub fn with_rng(
        rows: i32,
        cols: i32,
        plane_count: usize,
        footprint: Footprint,
        weights: SelectorWeights,
        rng: Rng,
    ) -> PfResult<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(PlaneForgeError::Config(format!(
                "Grid must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }
        let cells = rows
            .checked_mul(cols)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(|n| n.checked_mul(Orientation::COUNT).map(|_| n))
            .ok_or_else(|| {
                PlaneForgeError::Config(format!("Grid {}x{} is too large", rows, cols))
            })?;
        weights.validate()?;

        let space = CandidateSpace::new(rows, cols);
        let choices = ChoiceMap::new(space, &footprint);
        debug!(
            "Engine initialized: {}x{} grid, {} planes, {} of {} candidates viable",
            rows,
            cols,
            plane_count,
            choices.viable_count(),
            space.len()
        );

        Ok(Self {
            rows,
            cols,
            plane_count,
            footprint,
            choices,
            heads: Vec::new(),
            confirmed: Vec::new(),
            guesses: Vec::new(),
            evidence: Vec::new(),
            probed: vec![None; cells],
            selector: MoveSelector::new(weights),
            rng,
        })
    }

    pub fn from_config(config: &Config, seed: Option<u64>) -> PfResult<Self> {
        config.validate()?;
        Self::new(
            config.grid.rows,
            config.grid.cols,
            config.grid.planes,
            config.grid.footprint()?,
            config.selector,
            seed,
        )
    }

    /// Back to the post-initialization baseline. The random source is kept.
    pub fn reset(&mut self) {
        self.choices.reset(&self.footprint);
        self.heads.clear();
        self.confirmed.clear();
        self.guesses.clear();
        self.evidence.clear();
        self.probed.iter_mut().for_each(|p| *p = None);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    pub fn submit_probe(&mut self, row: i32, col: i32, outcome: Outcome) -> PfResult<Vec<Plane>> {
        self.submit(GuessPoint::new(row, col, outcome))
    }

    /// Applies one probe result and returns the planes it confirmed.
    ///
    /// A cell is only ever applied once: repeating it is a no-op, so hit
    /// evidence is never counted twice.
    pub fn submit(&mut self, gp: GuessPoint) -> PfResult<Vec<Plane>> {
        let cell = self.cell_index(gp.point())?;

        if let Some(prev) = self.probed[cell] {
            if prev == gp.outcome {
                debug!("Ignoring repeated probe at {}", gp.point());
            } else {
                warn!(
                    "Conflicting repeat at {}: recorded {}, got {}. Ignored.",
                    gp.point(),
                    prev,
                    gp.outcome
                );
            }
            return Ok(Vec::new());
        }

        self.probed[cell] = Some(gp.outcome);
        self.guesses.push(gp);
        self.evidence.push(gp);

        self.choices.apply(&gp, &self.footprint);
        self.update_heads(&gp);

        let confirmed = self.promote_resolved();
        debug!(
            "Probe {} -> {}: {} viable, {} active heads, {}/{} planes",
            gp.point(),
            gp.outcome,
            self.choices.viable_count(),
            self.heads.len(),
            self.confirmed.len(),
            self.plane_count
        );
        Ok(confirmed)
    }

    pub fn select_move(&mut self) -> Option<Point> {
        self.select_move_detailed().map(|m| m.point)
    }

    /// Like [`Engine::select_move`] but also reports which strategy fired.
    pub fn select_move_detailed(&mut self) -> Option<Move> {
        let choice = self
            .selector
            .select(&self.choices, &self.heads, &mut self.rng);

        if choice.is_none() && !self.is_solved() {
            warn!(
                "No moves remain but only {} of {} planes are confirmed",
                self.confirmed.len(),
                self.plane_count
            );
        }
        choice
    }

    pub fn is_solved(&self) -> bool {
        self.confirmed.len() >= self.plane_count
    }

    /// Viable placements through a cell, excluding those headed there.
    /// None when the cell is fully explained or off the grid.
    pub fn influence(&self, row: i32, col: i32) -> Option<usize> {
        self.choices.influence(Point::new(row, col), &self.footprint)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn plane_count(&self) -> usize {
        self.plane_count
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn choice_map(&self) -> &ChoiceMap {
        &self.choices
    }

    pub fn head_data(&self) -> &[HeadData] {
        &self.heads
    }

    pub fn confirmed(&self) -> &[Plane] {
        &self.confirmed
    }

    pub fn guesses(&self) -> &[GuessPoint] {
        &self.guesses
    }

    pub fn evidence(&self) -> &[GuessPoint] {
        &self.evidence
    }

    pub fn probed(&self, row: i32, col: i32) -> Option<Outcome> {
        let idx = self.cell_index(Point::new(row, col)).ok()?;
        self.probed[idx]
    }

    fn cell_index(&self, p: Point) -> PfResult<usize> {
        if !p.is_inside(self.rows, self.cols) {
            return Err(PlaneForgeError::OutOfBounds {
                row: p.row,
                col: p.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((p.row * self.cols + p.col) as usize)
    }

    fn update_heads(&mut self, gp: &GuessPoint) {
        for hd in &mut self.heads {
            let was_contradicted = hd.is_contradicted();
            hd.update(gp);
            if !was_contradicted && hd.is_contradicted() {
                warn!(
                    "Every orientation of head {} is ruled out after {}",
                    hd.head(),
                    gp.point()
                );
            }
        }

        if gp.is_dead() {
            // The evidence log already holds this probe.
            let hd = HeadData::with_history(
                gp.point(),
                self.rows,
                self.cols,
                &self.footprint,
                &self.evidence,
            );
            debug!(
                "New head at {} with {} live orientations",
                hd.head(),
                hd.remaining()
            );
            self.heads.push(hd);
        }
    }

    /// Converts every resolved head record into a confirmed plane and folds
    /// the plane's body back in as miss evidence.
    fn promote_resolved(&mut self) -> Vec<Plane> {
        let mut newly = Vec::new();

        for hd in std::mem::take(&mut self.heads) {
            match hd.into_plane() {
                Ok(plane) => {
                    let synthetic = self.choices.explain_plane(plane, &self.footprint);
                    self.evidence.extend(synthetic);
                    self.confirmed.push(plane);
                    info!(
                        "✈️  Plane confirmed at {} ({}/{})",
                        plane,
                        self.confirmed.len(),
                        self.plane_count
                    );
                    newly.push(plane);
                }
                Err(active) => self.heads.push(active),
            }
        }
        newly
    }
}
