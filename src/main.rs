use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use planeforge::config::Config;
use planeforge::error::{PfResult, PlaneForgeError};
use std::process;
use tracing::{info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file. Arguments given on the command line win over it.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Play(cmd::play::PlayArgs),
    Simulate(cmd::simulate::SimulateArgs),
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> PfResult<()> {
    // 1. Parse raw matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    // 2. Subcommand-level arguments live in the subcommand's matches, not the root.
    let Some((_, sub_matches)) = matches.subcommand() else {
        return Err(PlaneForgeError::Config("No subcommand given".to_string()));
    };
    let cli_config = match &cli.command {
        Commands::Play(args) => &args.config,
        Commands::Simulate(args) => &args.config,
    };

    // 3. Resolve configuration: JSON file as the base, explicit CLI values on top
    let config = if let Some(path) = &cli.config_file {
        info!("📂 Loading config: {}", path);
        let mut file_config = Config::load_from_file(path)?;
        file_config.merge_from_cli(cli_config, sub_matches);
        file_config
    } else {
        cli_config.clone()
    };
    config.validate()?;

    // 4. Execute
    match &cli.command {
        Commands::Play(args) => cmd::play::run(args, &config),
        Commands::Simulate(args) => cmd::simulate::run(args, &config),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ ERROR: {}", e);
        process::exit(1);
    }
}
