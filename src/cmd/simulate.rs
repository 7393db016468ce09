use crate::reports;
use clap::Args;
use planeforge::config::Config;
use planeforge::error::PfResult;
use planeforge::simulation::{SimulationOptions, Simulator};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Write one CSV row per game.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Print the full report as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &SimulateArgs, config: &Config) -> PfResult<()> {
    let options = SimulationOptions::from_config(config)?;
    let games = options.games;
    let simulator = Simulator::new(options);

    if !args.json {
        println!(
            "\n🔥 Playing {} games across {} threads",
            games,
            rayon::current_num_threads()
        );
    }

    let quiet = args.json;
    let report = simulator.run(move |done: usize, total: usize, mean: f64, gps: f32| {
        if !quiet {
            println!(
                "Games {:6}/{} | Mean moves: {:.2} | {:.0} games/s",
                done, total, mean, gps
            );
        }
        true
    })?;

    if let Some(path) = &args.csv {
        report.write_csv(path)?;
        if !args.json {
            println!("💾 Wrote {} games to {}", report.games.len(), path.display());
        }
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("\n=== 🏆 SIMULATION RESULT ===");
        println!("Base seed: {}", report.base_seed);
        reports::print_simulation_report(&report);
    }
    Ok(())
}
