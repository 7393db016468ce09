use super::{play_game, GameOutcome};
use crate::board::Board;
use crate::config::{Config, SelectorWeights};
use crate::engine::{Engine, GuessPoint};
use crate::error::PfResult;
use crate::geometry::Footprint;
use fastrand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Offset between a game's board stream and its engine stream.
pub const ENGINE_SEED_OFFSET: u64 = 9999;

pub struct SimulationOptions {
    pub rows: i32,
    pub cols: i32,
    pub planes: usize,
    pub footprint: Footprint,
    pub weights: SelectorWeights,
    pub games: usize,
    pub seed: Option<u64>,
    pub max_moves: usize,
    pub batch_size: usize,
}

impl SimulationOptions {
    pub fn from_config(cfg: &Config) -> PfResult<Self> {
        cfg.validate()?;
        Ok(Self {
            rows: cfg.grid.rows,
            cols: cfg.grid.cols,
            planes: cfg.grid.planes,
            footprint: cfg.grid.footprint()?,
            weights: cfg.selector,
            games: cfg.sim.games,
            seed: cfg.sim.seed,
            max_moves: cfg.grid.max_moves(&cfg.sim),
            batch_size: rayon::current_num_threads().max(1) * 4,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub games: usize,
    pub solved: usize,
    pub min_moves: usize,
    pub max_moves: usize,
    pub mean_moves: f64,
    pub mean_misses: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub base_seed: u64,
    pub summary: SimulationSummary,
    pub games: Vec<GameOutcome>,
}

impl SimulationReport {
    fn new(base_seed: u64, games: Vec<GameOutcome>) -> Self {
        Self {
            base_seed,
            summary: summarize(&games),
            games,
        }
    }

    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> PfResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for game in &self.games {
            writer.serialize(game)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> PfResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn summarize(games: &[GameOutcome]) -> SimulationSummary {
    if games.is_empty() {
        return SimulationSummary::default();
    }

    let n = games.len() as f64;
    SimulationSummary {
        games: games.len(),
        solved: games.iter().filter(|g| g.solved).count(),
        min_moves: games.iter().map(|g| g.moves).min().unwrap_or(0),
        max_moves: games.iter().map(|g| g.moves).max().unwrap_or(0),
        mean_moves: games.iter().map(|g| g.moves as f64).sum::<f64>() / n,
        mean_misses: games.iter().map(|g| g.misses as f64).sum::<f64>() / n,
    }
}

/// A trait for receiving updates while games are played.
/// Boolean return value indicates if the run should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, done: usize, total: usize, mean_moves: f64, gps: f32) -> bool;
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, usize, f64, f32) -> bool + Send + Sync,
{
    fn on_progress(&self, done: usize, total: usize, mean_moves: f64, gps: f32) -> bool {
        self(done, total, mean_moves, gps)
    }
}

pub struct Simulator {
    options: SimulationOptions,
}

impl Simulator {
    pub fn new(options: SimulationOptions) -> Self {
        Self { options }
    }

    /// Plays one seeded game. The same seed always yields the same game.
    pub fn play_one(&self, seed: u64) -> PfResult<GameOutcome> {
        let opts = &self.options;
        let mut board_rng = Rng::with_seed(seed);
        let board = Board::random(
            opts.rows,
            opts.cols,
            opts.planes,
            opts.footprint.clone(),
            &mut board_rng,
        )?;

        let mut engine = Engine::new(
            opts.rows,
            opts.cols,
            opts.planes,
            opts.footprint.clone(),
            opts.weights,
            Some(seed.wrapping_add(ENGINE_SEED_OFFSET)),
        )?;

        let mut log: Vec<GuessPoint> = Vec::new();
        let mut outcome = play_game(&mut engine, &board, &mut log, opts.max_moves)?;
        outcome.seed = seed;
        Ok(outcome)
    }

    pub fn run<CB: ProgressCallback>(&self, callback: CB) -> PfResult<SimulationReport> {
        let opts = &self.options;
        let base_seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
        let batch = opts.batch_size.max(1);

        info!(
            "🎲 Simulating {} games on a {}x{} grid with {} planes (seed {})",
            opts.games, opts.rows, opts.cols, opts.planes, base_seed
        );

        let mut results: Vec<GameOutcome> = Vec::with_capacity(opts.games);
        let start = Instant::now();

        while results.len() < opts.games {
            let from = results.len();
            let to = (from + batch).min(opts.games);

            let chunk: Vec<GameOutcome> = (from..to)
                .into_par_iter()
                .map(|i| self.play_one(base_seed.wrapping_add(i as u64)))
                .collect::<PfResult<Vec<_>>>()?;
            results.extend(chunk);

            let elapsed = start.elapsed().as_secs_f32().max(f32::EPSILON);
            let gps = results.len() as f32 / elapsed;
            let mean = summarize(&results).mean_moves;
            if !callback.on_progress(results.len(), opts.games, mean, gps) {
                info!("Simulation aborted after {} games", results.len());
                break;
            }
        }

        Ok(SimulationReport::new(base_seed, results))
    }
}
