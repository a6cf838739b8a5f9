//! CLI argument parsing.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Keep rotated time-spaced archives of a file.
///
/// FILE must match one of the patterns of the configuration file.
#[derive(Debug, Parser)]
#[command(name = "cronicle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File to archive
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Remove previous file backup when no symlink points to it
    #[arg(short, long)]
    pub remove: bool,

    /// Just print instead of writing on filesystem
    #[arg(short, long, action = ArgAction::Count)]
    pub dry_run: u8,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "CRONICLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Log verbosity: a dry run is always at least as chatty as `-v`.
    pub fn verbosity(&self) -> u8 {
        self.verbose.max(self.dry_run)
    }

    /// Whether mutations should only be logged.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run > 0
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (created links only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
