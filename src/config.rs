use crate::error::{PfResult, PlaneForgeError};
use crate::geometry::Footprint;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub grid: GridParams,
    #[command(flatten)]
    pub selector: SelectorWeights,
    #[command(flatten)]
    pub sim: SimulationParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    #[arg(long, default_value_t = 10)]
    pub rows: i32,
    #[arg(long, default_value_t = 10)]
    pub cols: i32,
    #[arg(long, default_value_t = 3)]
    pub planes: usize,

    // Orientation-0 body offsets "dr:dc;dr:dc". Empty = classic plane.
    #[arg(long, default_value = "")]
    pub shape: String,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            planes: 3,
            shape: String::new(),
        }
    }
}

/// Percentages used to blend the three move strategies.
/// Exploration always receives the remainder up to 100.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectorWeights {
    // === All three strategies available ===
    #[arg(long, default_value_t = 60)]
    pub mix_head_all: u32,
    #[arg(long, default_value_t = 30)]
    pub mix_completion_all: u32,

    // === Head-seeking plus one other ===
    #[arg(long, default_value_t = 70)]
    pub mix_head_pair: u32,
}

impl Default for SelectorWeights {
    fn default() -> Self {
        Self {
            mix_head_all: 60,
            mix_completion_all: 30,
            mix_head_pair: 70,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    #[arg(long, default_value_t = 100)]
    pub games: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    // 0 = rows * cols
    #[arg(long, default_value_t = 0)]
    pub max_moves: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            max_moves: 0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlays only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(grid.rows);
        update_if_present!(grid.cols);
        update_if_present!(grid.planes);
        update_if_present!(grid.shape);

        update_if_present!(selector.mix_head_all);
        update_if_present!(selector.mix_completion_all);
        update_if_present!(selector.mix_head_pair);

        update_if_present!(sim.games);
        update_if_present!(sim.seed);
        update_if_present!(sim.max_moves);
    }

    pub fn validate(&self) -> PfResult<()> {
        if self.grid.rows <= 0 || self.grid.cols <= 0 {
            return Err(PlaneForgeError::Config(format!(
                "Grid must be at least 1x1, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        if self.grid.rows.checked_mul(self.grid.cols).is_none() {
            return Err(PlaneForgeError::Config(format!(
                "Grid {}x{} is too large",
                self.grid.rows, self.grid.cols
            )));
        }
        if self.grid.planes == 0 {
            return Err(PlaneForgeError::Config(
                "At least one plane is required".to_string(),
            ));
        }
        self.grid.footprint()?;
        self.selector.validate()
    }
}

impl GridParams {
    pub fn footprint(&self) -> PfResult<Footprint> {
        Footprint::parse(&self.shape)
    }

    pub fn max_moves(&self, sim: &SimulationParams) -> usize {
        if sim.max_moves == 0 {
            self.rows.max(0) as usize * self.cols.max(0) as usize
        } else {
            sim.max_moves
        }
    }
}

impl SelectorWeights {
    pub fn validate(&self) -> PfResult<()> {
        if self.mix_directed_all() > 100 {
            return Err(PlaneForgeError::Config(format!(
                "--mix-head-all + --mix-completion-all must not exceed 100 (got {} + {})",
                self.mix_head_all, self.mix_completion_all
            )));
        }
        if self.mix_head_pair > 100 {
            return Err(PlaneForgeError::Config(format!(
                "--mix-head-pair must not exceed 100 (got {})",
                self.mix_head_pair
            )));
        }
        Ok(())
    }

    /// Head-seeking plus completion share when all three strategies apply.
    /// Saturates instead of wrapping on oversized weights.
    #[inline(always)]
    pub fn mix_directed_all(&self) -> u32 {
        self.mix_head_all.saturating_add(self.mix_completion_all)
    }

    #[inline(always)]
    pub fn mix_explore_all(&self) -> u32 {
        100u32.saturating_sub(self.mix_directed_all())
    }
}
