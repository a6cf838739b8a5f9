//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No configured pattern matches the file
    #[error("No pattern found in {} that matches {}", .config_path.display(), .file.display())]
    NoMatchingPolicy {
        /// The file being archived
        file: PathBuf,
        /// Config file that was searched
        config_path: PathBuf,
    },

    /// Rotation error
    #[error(transparent)]
    Rotate(#[from] cronicle_rotator::RotateError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
