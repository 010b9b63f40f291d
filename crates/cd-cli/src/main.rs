//! CLI frontend for the Cutieroid companion.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cutie",
    about = "Cutieroid companion: play and author doll scenarios",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios and whether they are unlocked
    List {
        /// Affection level to check unlocks against (0-100)
        #[arg(short, long, default_value = "42")]
        affection: u8,
    },

    /// Scan for nearby dolls (simulated)
    Scan {
        /// Skip the scan delay
        #[arg(long)]
        no_pause: bool,
    },

    /// Validate a scenario file
    Check {
        /// Path to a scenario JSON document
        file: PathBuf,
    },

    /// Print every node of a scenario
    Show {
        /// Built-in scenario id (e.g. s1)
        #[arg(conflicts_with = "file")]
        id: Option<String>,

        /// Read the scenario from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Write a built-in scenario as a JSON document
    Export {
        /// Built-in scenario id (e.g. s1)
        id: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play a scenario interactively
    Play {
        /// Built-in scenario id (default: s1)
        #[arg(conflicts_with = "file")]
        id: Option<String>,

        /// Play a scenario from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Override the doll's affection level (0-100)
        #[arg(short, long)]
        affection: Option<u8>,

        /// Override the doll's battery level (0-100)
        #[arg(short, long)]
        battery: Option<u8>,

        /// Skip the pause after each choice
        #[arg(long)]
        no_pause: bool,
    },
}

fn main() {
    // RUST_LOG=info shows session events, RUST_LOG=debug every engine move.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { affection } => commands::list::run(affection),
        Commands::Scan { no_pause } => commands::scan::run(no_pause),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Show { id, file } => commands::show::run(id.as_deref(), file.as_deref()),
        Commands::Export { id, output } => commands::export::run(&id, output.as_deref()),
        Commands::Play {
            id,
            file,
            affection,
            battery,
            no_pause,
        } => commands::play::run(commands::play::PlayOptions {
            id,
            file,
            affection,
            battery,
            no_pause,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
