//! Error types for rotation operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while archiving or rotating a file
#[derive(Error, Debug)]
pub enum RotateError {
    /// Filesystem failure; aborts the run
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// An entry already occupies the archive path; the tier's creation is skipped
    #[error("{} already exists", .0.display())]
    Conflict(PathBuf),

    /// The policy pattern is not a valid glob
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Parser error
        #[source]
        source: globset::Error,
    },

    /// The input path cannot be archived (no parent directory or no file name)
    #[error("Invalid input file: {}", .0.display())]
    InvalidInput(PathBuf),
}

impl RotateError {
    /// Closure wrapping an `io::Error` with the path it happened on
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| RotateError::Io { path, source }
    }
}
