//! Trait definitions for external interactions
//!
//! These traits define the boundaries between rotation logic and the outside
//! world. Implementations live in `cronicle-rotator`.

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Source of the current time
///
/// Tier gating compares archive creation times against `now()`.
pub trait Clock {
    /// Current time
    fn now(&self) -> SystemTime;
}

/// Every filesystem mutation a rotation may perform
///
/// Implemented once for the live filesystem and once for dry-run, where each
/// call only logs what it would have done.
pub trait LinkEffects {
    /// Create `dir` and any missing parents
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Create a symlink at `link` pointing to `original`
    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()>;

    /// Remove the link entry at `link` (never its target)
    fn unlink(&self, link: &Path) -> io::Result<()>;

    /// Remove the regular file at `path`
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}
