//! CLI frontend for the dungeon crawl balance simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dcrawl",
    about = "Dungeon crawl balance simulator",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output, including per-run results
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random dungeons and list their encounters
    Generate {
        /// Number of dungeons to generate
        #[arg(short = 'n', long, default_value = "5")]
        count: u64,

        /// RNG seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// World definition file (default: the standard world)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Run random dungeons with assembled parties and report statistics
    Run {
        /// Number of runs
        #[arg(short, long, default_value = "1000")]
        runs: u64,

        /// RNG seed for deterministic runs
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Directory to write the record tables into
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Append to existing record tables instead of truncating them
        #[arg(long, requires = "out")]
        append: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// World definition file (default: the standard world)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Run a fixed party against a fixed list of encounters
    Party {
        /// Party roster, e.g. "Ranger:3,Fighter:4,Druid:3,Ranger:3"
        #[arg(short, long, required_unless_present = "scenario")]
        party: Option<String>,

        /// Encounter names, e.g. "Goblins,Boulder Trap,Goblin Chieftain"
        #[arg(short, long, requires = "party", conflicts_with = "scenario")]
        encounters: Option<String>,

        /// JSON scenario file with a party and encounters
        #[arg(long, conflicts_with = "party")]
        scenario: Option<PathBuf>,

        /// Number of runs
        #[arg(short, long, default_value = "1000")]
        runs: u64,

        /// RNG seed for deterministic runs
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Print the encounter-by-encounter trace of the first run
        #[arg(short, long)]
        trace: bool,

        /// World definition file (default: the standard world)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },

    /// Compare every party composition against a fixed list of encounters
    Sweep {
        /// Encounter names, e.g. "Goblins,Boulder Trap,Goblin Chieftain"
        #[arg(short, long)]
        encounters: String,

        /// Level of every adventurer
        #[arg(short, long, default_value = "3")]
        level: u32,

        /// Runs per composition
        #[arg(short, long, default_value = "1000")]
        runs: u64,

        /// RNG seed for deterministic runs
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// World definition file (default: the standard world)
        #[arg(short, long)]
        world: Option<PathBuf>,
    },
}

/// `RUST_LOG` wins when set; otherwise `-v` picks debug over info.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate { count, seed, world } => {
            commands::generate::run(world.as_deref(), count, seed)
        }
        Commands::Run {
            runs,
            seed,
            out,
            append,
            json,
            world,
        } => commands::run::run(world.as_deref(), runs, seed, out.as_deref(), append, json),
        Commands::Party {
            party,
            encounters,
            scenario,
            runs,
            seed,
            trace,
            world,
        } => commands::party::run(
            world.as_deref(),
            party.as_deref(),
            encounters.as_deref(),
            scenario.as_deref(),
            runs,
            seed,
            trace,
        ),
        Commands::Sweep {
            encounters,
            level,
            runs,
            seed,
            world,
        } => commands::sweep::run(world.as_deref(), &encounters, level, runs, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
