use super::types::{GuessPoint, Outcome};
use super::{Engine, Move};
use crate::error::PfResult;
use crate::geometry::{Plane, Point};
use tracing::debug;

/// Undo/redo by deterministic replay.
///
/// Engine state is a pure function of the probes applied since the last
/// reset, so reverting rebuilds it from the recorded play log instead of
/// restoring snapshots.
pub struct ReplayEngine {
    engine: Engine,
    play_log: Vec<GuessPoint>,
    // Number of recorded probes currently applied to the engine.
    cursor: usize,
}

impl ReplayEngine {
    pub fn new(mut engine: Engine) -> Self {
        engine.reset();
        Self {
            engine,
            play_log: Vec::new(),
            cursor: 0,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn recorded(&self) -> &[GuessPoint] {
        &self.play_log
    }

    pub fn can_advance(&self) -> bool {
        self.cursor < self.play_log.len()
    }

    pub fn submit_probe(&mut self, row: i32, col: i32, outcome: Outcome) -> PfResult<Vec<Plane>> {
        self.submit(GuessPoint::new(row, col, outcome))
    }

    /// Applies a new probe. Submitting after a revert discards the redo tail.
    pub fn submit(&mut self, gp: GuessPoint) -> PfResult<Vec<Plane>> {
        if self.engine.probed(gp.row, gp.col).is_some() {
            return self.engine.submit(gp);
        }

        let confirmed = self.engine.submit(gp)?;
        if self.play_log.len() > self.cursor {
            debug!(
                "Dropping {} redo entries",
                self.play_log.len() - self.cursor
            );
            self.play_log.truncate(self.cursor);
        }
        self.play_log.push(gp);
        self.cursor += 1;
        Ok(confirmed)
    }

    pub fn select_move(&mut self) -> Option<Point> {
        self.engine.select_move()
    }

    pub fn select_move_detailed(&mut self) -> Option<Move> {
        self.engine.select_move_detailed()
    }

    pub fn is_solved(&self) -> bool {
        self.engine.is_solved()
    }

    /// Steps back `n` probes, clamping at the empty state.
    pub fn revert(&mut self, n: usize) -> PfResult<()> {
        if n == 0 {
            return Ok(());
        }

        let target = self.cursor.saturating_sub(n);
        self.engine.reset();
        for gp in &self.play_log[..target] {
            self.engine.submit(*gp)?;
        }
        debug!("Reverted {} -> {} probes", self.cursor, target);
        self.cursor = target;
        Ok(())
    }

    /// Re-applies the next recorded probe. A no-op at the end of the log.
    pub fn advance(&mut self) -> PfResult<Vec<Plane>> {
        let Some(&gp) = self.play_log.get(self.cursor) else {
            return Ok(Vec::new());
        };
        let confirmed = self.engine.submit(gp)?;
        self.cursor += 1;
        Ok(confirmed)
    }
}
