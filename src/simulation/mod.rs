pub mod runner;

pub use self::runner::{
    ProgressCallback, SimulationOptions, SimulationReport, Simulator, ENGINE_SEED_OFFSET,
};

use crate::board::{PlaneSource, ProbeSink};
use crate::engine::{Engine, GuessPoint, Outcome};
use crate::error::PfResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub seed: u64,
    pub moves: usize,
    pub hits: usize,
    pub misses: usize,
    pub deads: usize,
    pub solved: bool,
}

/// Plays the engine against a board until every plane is confirmed,
/// no move remains, or `max_moves` probes were made.
pub fn play_game<S, K>(
    engine: &mut Engine,
    board: &S,
    sink: &mut K,
    max_moves: usize,
) -> PfResult<GameOutcome>
where
    S: PlaneSource + ?Sized,
    K: ProbeSink + ?Sized,
{
    let mut outcome = GameOutcome::default();

    while !engine.is_solved() && outcome.moves < max_moves {
        let Some(p) = engine.select_move() else {
            break;
        };

        let gp = GuessPoint::at(p, board.probe(p));
        engine.submit(gp)?;
        sink.record(gp);

        outcome.moves += 1;
        match gp.outcome {
            Outcome::Hit => outcome.hits += 1,
            Outcome::Miss => outcome.misses += 1,
            Outcome::Dead => outcome.deads += 1,
        }
    }

    outcome.solved = engine.is_solved();
    debug!(
        "Game over after {} moves (solved: {})",
        outcome.moves, outcome.solved
    );
    Ok(outcome)
}
