use crate::reports::{self, ProbeRecord};
use clap::Args;
use fastrand::Rng;
use planeforge::board::{Board, PlaneSource};
use planeforge::config::Config;
use planeforge::engine::{Engine, GuessPoint, ReplayEngine};
use planeforge::error::{PfResult, PlaneForgeError};
use planeforge::simulation::ENGINE_SEED_OFFSET;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: Config,

    /// After the game, revert this many probes, replay them and check the state matches.
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Skip the per-turn probe table.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

pub fn run(args: &PlayArgs, config: &Config) -> PfResult<()> {
    let grid = &config.grid;
    let seed = config.sim.seed.unwrap_or_else(|| fastrand::u64(..));
    let footprint = grid.footprint()?;

    let mut board_rng = Rng::with_seed(seed);
    let board = Board::random(
        grid.rows,
        grid.cols,
        grid.planes,
        footprint,
        &mut board_rng,
    )?;

    println!(
        "\n🛩️  {}x{} board with {} planes (seed {})",
        grid.rows,
        grid.cols,
        board.plane_count(),
        seed
    );
    reports::print_board_grid("HIDDEN", &board, grid.rows, grid.cols, &[]);

    let engine = Engine::from_config(config, Some(seed.wrapping_add(ENGINE_SEED_OFFSET)))?;
    let mut game = ReplayEngine::new(engine);
    let max_moves = grid.max_moves(&config.sim);

    let mut records = Vec::new();
    while !game.is_solved() && records.len() < max_moves {
        let Some(mv) = game.select_move_detailed() else {
            break;
        };
        let outcome = board.probe(mv.point);
        let confirmed = game.submit(GuessPoint::at(mv.point, outcome))?;
        records.push(ProbeRecord {
            turn: records.len() + 1,
            mv,
            outcome,
            confirmed,
        });
    }

    if !args.quiet {
        reports::print_probe_log(&records);
    }
    reports::print_board_grid(
        "PROBED",
        &board,
        grid.rows,
        grid.cols,
        game.engine().guesses(),
    );

    println!("Moves: {}", records.len());
    println!("Solved: {}", game.is_solved());

    if args.undo > 0 {
        verify_replay(&mut game, args.undo)?;
    }
    Ok(())
}

/// Reverts `n` probes, re-advances to the end of the log and checks the
/// rebuilt state is identical to the state before the revert.
fn verify_replay(game: &mut ReplayEngine, n: usize) -> PfResult<()> {
    let scores_before = game.engine().choice_map().raw_scores();
    let confirmed_before = game.engine().confirmed().to_vec();
    let end = game.cursor();

    game.revert(n)?;
    let reverted_to = game.cursor();
    info!("⏪ Reverted to probe {} of {}", reverted_to, end);

    while game.can_advance() {
        game.advance()?;
    }

    let matches = game.engine().choice_map().raw_scores() == scores_before
        && game.engine().confirmed() == confirmed_before.as_slice();

    println!(
        "Replay: {} -> {} -> {} ({})",
        end,
        reverted_to,
        game.cursor(),
        if matches { "OK" } else { "MISMATCH" }
    );

    if !matches {
        return Err(PlaneForgeError::Validation(
            "Replayed state differs from the state before revert".to_string(),
        ));
    }
    Ok(())
}
