//! Terminal front-end for the geography capital quiz.

mod commands;
mod identity;
mod store;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use identity::CliIdentity;
use store::JsonStore;

#[derive(Parser)]
#[command(
    name = "gq",
    about = "Geography capital quiz for the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding places.json and history.json
    #[arg(short, long, global = true, default_value = "data")]
    data: PathBuf,

    /// Player identifier, usually an e-mail address (falls back to GQ_PLAYER)
    #[arg(short, long, global = true)]
    player: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed session in one region
    Play {
        /// Region to play (e.g. colombia, suramerica)
        #[arg(default_value = "colombia")]
        region: String,

        /// RNG seed for a reproducible question order
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of rounds (default: 15)
        #[arg(short = 'n', long)]
        questions: Option<usize>,
    },

    /// Show the leaderboard of one region, or of every region
    Ranking {
        /// Region to rank (default: all regions)
        region: Option<String>,
    },

    /// List regions with their lock state and your best scores
    Regions,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    let mut store = JsonStore::new(&cli.data);
    let identity = CliIdentity::new(cli.player);

    let result = match cli.command {
        Commands::Play {
            region,
            seed,
            questions,
        } => commands::play::run(&mut store, &identity, &region, seed, questions),
        Commands::Ranking { region } => commands::ranking::run(&store, region.as_deref()),
        Commands::Regions => commands::regions::run(&store, &identity),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `GQ_LOG` when set.
fn init_tracing(quiet: bool, verbose: bool) -> Result<(), String> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GQ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("failed to initialize logging: {e}"))
}
