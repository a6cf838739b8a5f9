//! Link directory scanner and link resolution

use crate::RotateError;
use cronicle_domain::SymlinkRecord;
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on links followed when resolving a dangling chain
const MAX_LINK_HOPS: usize = 40;

/// Lists the archive links of a folder
///
/// Only symlinks whose file name matches the pattern are returned, oldest
/// first. The sort key is the creation time of the link entry itself: a
/// link's modification time follows its target on some platforms, its
/// birth time does not. Filesystems that do not report birth time fall back
/// to the link's own modification time.
#[derive(Debug, Clone)]
pub struct LinkScanner {
    pattern: String,
    matcher: GlobMatcher,
}

impl LinkScanner {
    /// Build a scanner for a glob pattern (`*` does not cross `/`)
    pub fn new(pattern: &str) -> Result<Self, RotateError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| RotateError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The glob this scanner matches link names against
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matching symlinks in `folder`, ordered by ascending creation time
    ///
    /// A missing folder yields an empty list.
    pub fn scan(&self, folder: &Path) -> Result<Vec<SymlinkRecord>, RotateError> {
        tracing::debug!("Scanning {} for symlinks matching {}", folder.display(), self.pattern);

        let entries = match fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RotateError::io(folder)(e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(RotateError::io(folder))?;
            if !self.matcher.is_match(entry.file_name()) {
                continue;
            }

            let path = entry.path();
            let meta = fs::symlink_metadata(&path).map_err(RotateError::io(&path))?;
            if !meta.file_type().is_symlink() {
                continue;
            }

            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .map_err(RotateError::io(&path))?;
            records.push(SymlinkRecord::new(path, created));
        }

        records.sort();
        Ok(records)
    }

    /// Matching symlinks in `folder`, newest first
    pub fn scan_newest_first(&self, folder: &Path) -> Result<Vec<SymlinkRecord>, RotateError> {
        let mut records = self.scan(folder)?;
        records.reverse();
        Ok(records)
    }

    /// The most recently created matching symlink in `folder`
    pub fn latest(&self, folder: &Path) -> Result<Option<SymlinkRecord>, RotateError> {
        Ok(self.scan(folder)?.pop())
    }
}

/// Real path a link ultimately points to
///
/// Follows the whole link chain. When the chain ends on a missing file the
/// path it would have reached is returned instead of an error. A chain that
/// loops resolves to the last link visited, which is itself a symlink.
pub fn resolve_target(link: &Path) -> Result<PathBuf, RotateError> {
    if let Ok(path) = fs::canonicalize(link) {
        return Ok(path);
    }

    let mut current = link.to_path_buf();
    for _ in 0..MAX_LINK_HOPS {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let next = fs::read_link(&current).map_err(RotateError::io(&current))?;
                current = match current.parent() {
                    Some(parent) => parent.join(next),
                    None => next,
                };
            }
            Ok(_) => return Ok(normalize_dangling(current)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(normalize_dangling(current)),
            Err(e) => return Err(RotateError::io(&current)(e)),
        }
    }

    tracing::warn!("Link chain of {} does not end", link.display());
    Ok(normalize_dangling(current))
}

/// Canonicalize the existing parent of a path whose last component is missing
fn normalize_dangling(path: PathBuf) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|parent| parent.join(name))
            .unwrap_or(path),
        _ => path,
    }
}
