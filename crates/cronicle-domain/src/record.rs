//! Symlink record - one archive link found in a tier folder

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// An archive link as seen by a folder scan
///
/// The filesystem owns the link; a record is only a snapshot of its path and
/// creation time. Records order by creation time, then by path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SymlinkRecord {
    /// Creation time of the link entry itself (not of its target)
    pub created: SystemTime,

    /// Path of the link
    pub path: PathBuf,
}

impl SymlinkRecord {
    /// Create a record
    pub fn new(path: impl Into<PathBuf>, created: SystemTime) -> Self {
        Self {
            created,
            path: path.into(),
        }
    }

    /// Path of the link
    pub fn path(&self) -> &Path {
        &self.path
    }
}
