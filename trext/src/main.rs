//! Trext CLI - the command-line front end of the trex regex engine.
//!
//! Subcommands cover the engine's public operations: whole-string
//! matching, substring search, random string generation, and DOT
//! export of the compiled graph. Exit codes: 0 success/match, 1 clean
//! no-match, 2 any error.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{dot::DotArgs, generate::GenerateArgs, matching::MatchArgs, search::SearchArgs};
use config::Config;
use error::Result;

/// Trext - match, search and generate with the trex engine
#[derive(Parser, Debug)]
#[command(name = "trext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A command-line front end for the trex regex engine", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "TREXT_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TREXT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Match a pattern against the whole input string
    Match(MatchArgs),

    /// Search the input for matching substrings
    Search(SearchArgs),

    /// Generate random strings matching a pattern
    Generate(GenerateArgs),

    /// Export the compiled NFA as a DOT graph
    Dot(DotArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let config = Config::load(cli.config.as_deref())?;
    let as_json = cli.json || config.json;

    match &cli.command {
        Commands::Match(args) => commands::matching::run(args, &config, as_json),
        Commands::Search(args) => commands::search::run(args, &config, as_json),
        Commands::Generate(args) => commands::generate::run(args, &config, as_json),
        Commands::Dot(args) => commands::dot::run(args, &config),
    }
}

/// Tracing to stderr; `-v` forces debug, otherwise `RUST_LOG` decides.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
