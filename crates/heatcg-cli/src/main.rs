//! heatcg CLI: 2D steady-state heat diffusion solved with Conjugate Gradient.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use heatcg_types::HeatError;

mod commands;

#[derive(Parser)]
#[command(name = "heatcg")]
#[command(version, about = "2D heat equation solver (finite differences + Conjugate Gradient)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the heat system from an input file and solve it.
    Solve {
        /// Input file: `L W h Tc Th` as plain text, or a `.toml` table.
        input: PathBuf,

        /// Prefix for solution snapshot files (`<prefix>NNN.txt`).
        prefix: String,

        /// Solver config (TOML).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write solver events as JSON lines to this file.
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Only log warnings and errors.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a heat input file or a solver config.
    Validate {
        /// Path to input or config file.
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(cli.command, Commands::Solve { quiet: true, .. });
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Solve {
            input,
            prefix,
            config,
            events,
            ..
        } => commands::solve(&input, &prefix, config.as_deref(), events.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                HeatError::NotConverged { .. } => ExitCode::from(2),
                _ => ExitCode::from(1),
            }
        }
    }
}
