//! asmdiff CLI - structural diff for compiled modules
//!
//! Compares two module files, or two directory trees of module files, and
//! reports the types and members that were added, removed or modified.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use asmdiff_core::batch::{BatchOptions, DiscoveryOptions};

mod commands;
mod config;
mod error;
mod output;

use config::AsmdiffConfig;
use error::UsageError;
use output::{OutputConfig, OutputFormat};

/// Structural diff between two versions of a compiled module.
///
/// Pass two module files to compare them directly, or two directories to
/// compare every module present in both.
#[derive(Parser)]
#[command(name = "asmdiff")]
#[command(author, version)]
#[command(about = "Structural diff between two versions of a compiled module")]
#[command(after_help = "Examples:
  asmdiff v1/Lib.json v2/Lib.json    Diff two module snapshots
  asmdiff build/v1 build/v2 -r       Diff every module under two trees
  asmdiff v1 v2 --format json        Machine-readable batch report")]
pub struct Cli {
    /// Original module file or directory
    original: PathBuf,

    /// Changed module file or directory
    changed: PathBuf,

    /// Module file extension in directory mode (default: json)
    #[arg(long, value_name = "EXT")]
    ext: Option<String>,

    /// Descend into subdirectories in directory mode
    #[arg(short, long)]
    recursive: bool,

    /// Worker threads for directory mode (default: one per core)
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Output format (overrides config default)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors and hide progress
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Setup logging based on verbosity flags
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Merge command-line flags over `.asmdiff.toml` values.
fn batch_options(cli: &Cli, config: &AsmdiffConfig) -> BatchOptions {
    let extension = cli.ext.as_deref().unwrap_or_else(|| config.extension());
    BatchOptions {
        discovery: DiscoveryOptions::new(extension, cli.recursive || config.recursive()),
        threads: cli.jobs.or_else(|| config.threads()),
    }
}

fn output_config(cli: &Cli, config: &AsmdiffConfig) -> OutputConfig {
    // CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| match f.parse() {
                Ok(format) => Some(format),
                Err(e) => {
                    tracing::warn!("Ignoring output format from config: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    });
    let color = if cli.no_color {
        Some(false)
    } else {
        config.use_color()
    };
    OutputConfig::auto_detect_with_color_override(format, color)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = AsmdiffConfig::load(std::path::Path::new("."));
    let options = batch_options(&cli, &config);
    let output = output_config(&cli, &config);
    let show_progress = !cli.quiet && std::io::stderr().is_terminal();

    match commands::diff::run(&cli.original, &cli.changed, &options, output, show_progress) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            if e.downcast_ref::<UsageError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
