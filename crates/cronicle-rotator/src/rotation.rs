//! Rotation engine: trim a tier to its retention count
//!
//! Evicted links are always removed. Their target files are removed too when
//! the policy allows it and no other tier folder still holds a link resolving
//! to the same file. Reference checks re-scan the folders on every eviction,
//! so links removed earlier in the same run are never counted. A link whose
//! chain loops is evicted like any other, but has no target to remove.

use crate::creator::split_file;
use crate::scanner::resolve_target;
use crate::{LinkScanner, RotateError};
use cronicle_domain::{LinkEffects, Tier};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What rotating one tier did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationOutcome {
    /// Links left in the tier
    pub kept: usize,

    /// Links removed from the tier
    pub unlinked: Vec<PathBuf>,

    /// Target files deleted
    pub removed: Vec<PathBuf>,

    /// Target files left because another tier still links to them
    pub still_referenced: Vec<PathBuf>,
}

/// Keep the `keep` newest links of `tier` and evict the rest
pub fn rotate_tier(
    file: &Path,
    tier: Tier,
    keep: usize,
    remove: bool,
    scanner: &LinkScanner,
    effects: &dyn LinkEffects,
) -> Result<RotationOutcome, RotateError> {
    let (dir, _) = split_file(file)?;
    let folder = tier.folder_in(dir);

    let links = scanner.scan_newest_first(&folder)?;
    let split = keep.min(links.len());
    let (kept, evicted) = links.split_at(split);
    tracing::debug!(
        "Keep {:?}",
        kept.iter().map(|r| r.path()).collect::<Vec<_>>()
    );

    let mut outcome = RotationOutcome {
        kept: kept.len(),
        ..Default::default()
    };

    // Oldest surplus first
    for record in evicted.iter().rev() {
        let link = record.path();
        let target = resolve_target(link)?;

        effects.unlink(link).map_err(RotateError::io(link))?;
        outcome.unlinked.push(link.to_path_buf());

        if !remove {
            continue;
        }

        if is_referenced(&target, dir, tier, scanner)? {
            tracing::info!(
                "Keeping {}: still linked from another tier",
                target.display()
            );
            outcome.still_referenced.push(target);
            continue;
        }

        if !is_removable(&target)? {
            tracing::debug!("Target {} is gone or never resolved", target.display());
            continue;
        }

        effects
            .remove_file(&target)
            .map_err(RotateError::io(&target))?;
        outcome.removed.push(target);
    }

    Ok(outcome)
}

/// Whether a tier other than `current` holds a link resolving to `target`
pub fn is_referenced(
    target: &Path,
    dir: &Path,
    current: Tier,
    scanner: &LinkScanner,
) -> Result<bool, RotateError> {
    for tier in current.others() {
        for record in scanner.scan(&tier.folder_in(dir))? {
            if resolve_target(record.path())? == target {
                tracing::debug!(
                    "{} is referenced by {}",
                    target.display(),
                    record.path().display()
                );
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Whether `path` is a file rotation may delete: it exists and is not a link
/// left over from a chain that loops
fn is_removable(path: &Path) -> Result<bool, RotateError> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(!meta.file_type().is_symlink()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RotateError::io(path)(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{DryRun, LiveFs};
    use std::os::unix::fs::symlink;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Write `names` next to each other and link each one from `tier`'s folder,
    /// oldest first
    fn archive(dir: &Path, tier: Tier, names: &[&str]) -> Vec<PathBuf> {
        let folder = tier.folder_in(dir);
        fs::create_dir_all(&folder).unwrap();
        names
            .iter()
            .map(|name| {
                let file = dir.join(name);
                fs::write(&file, name.as_bytes()).unwrap();
                symlink(&file, folder.join(name)).unwrap();
                thread::sleep(Duration::from_millis(20));
                file
            })
            .collect()
    }

    #[test]
    fn test_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar", "b-3.tar", "b-4.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[3], Tier::Daily, 3, false, &scanner, &LiveFs).unwrap();

        assert_eq!(outcome.kept, 3);
        assert_eq!(outcome.unlinked, vec![dir.path().join("daily").join("b-1.tar")]);
        assert!(outcome.removed.is_empty());
        assert!(files[0].exists(), "target must survive without removal permission");
        assert_eq!(scanner.scan(&dir.path().join("daily")).unwrap().len(), 3);
    }

    #[test]
    fn test_evicts_oldest_surplus_first() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar", "b-3.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[2], Tier::Daily, 1, false, &scanner, &LiveFs).unwrap();

        let daily = dir.path().join("daily");
        assert_eq!(outcome.unlinked, vec![daily.join("b-1.tar"), daily.join("b-2.tar")]);
    }

    #[test]
    fn test_removes_unreferenced_target() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[1], Tier::Daily, 1, true, &scanner, &LiveFs).unwrap();

        assert_eq!(outcome.removed, vec![fs::canonicalize(dir.path()).unwrap().join("b-1.tar")]);
        assert!(!files[0].exists());
        assert!(files[1].exists());
    }

    #[test]
    fn test_keeps_target_linked_from_other_tier() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar"]);
        let weekly = Tier::Weekly.folder_in(dir.path());
        fs::create_dir_all(&weekly).unwrap();
        symlink(&files[0], weekly.join("b-1.tar")).unwrap();
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[1], Tier::Daily, 1, true, &scanner, &LiveFs).unwrap();

        assert_eq!(outcome.unlinked.len(), 1);
        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.still_referenced.len(), 1);
        assert!(files[0].exists());
    }

    #[test]
    fn test_dry_run_only_reports() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[1], Tier::Daily, 1, true, &scanner, &DryRun).unwrap();

        assert_eq!(outcome.unlinked.len(), 1);
        assert_eq!(outcome.removed.len(), 1);
        assert!(files[0].exists());
        assert_eq!(scanner.scan(&dir.path().join("daily")).unwrap().len(), 2);
    }

    #[test]
    fn test_under_retention_is_noop() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Monthly, &["b-1.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[0], Tier::Monthly, 5, true, &scanner, &LiveFs).unwrap();

        assert_eq!(outcome, RotationOutcome { kept: 1, ..Default::default() });
    }

    #[test]
    fn test_looping_links_do_not_block_rotation() {
        let dir = TempDir::new().unwrap();
        let daily = Tier::Daily.folder_in(dir.path());
        let weekly = Tier::Weekly.folder_in(dir.path());
        fs::create_dir_all(&daily).unwrap();
        fs::create_dir_all(&weekly).unwrap();
        symlink("loop.tar", daily.join("loop.tar")).unwrap();
        symlink("spin.tar", weekly.join("spin.tar")).unwrap();
        thread::sleep(Duration::from_millis(20));
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar", "b-3.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[2], Tier::Daily, 2, true, &scanner, &LiveFs).unwrap();

        assert_eq!(outcome.unlinked, vec![daily.join("loop.tar"), daily.join("b-1.tar")]);
        assert_eq!(outcome.removed, vec![fs::canonicalize(dir.path()).unwrap().join("b-1.tar")]);
        assert!(fs::symlink_metadata(daily.join("loop.tar")).is_err());
        assert!(fs::symlink_metadata(weekly.join("spin.tar")).is_ok());
        assert_eq!(scanner.scan(&daily).unwrap().len(), 2);
    }

    #[test]
    fn test_dry_run_never_removes_a_looping_link() {
        let dir = TempDir::new().unwrap();
        let daily = Tier::Daily.folder_in(dir.path());
        fs::create_dir_all(&daily).unwrap();
        symlink("loop.tar", daily.join("loop.tar")).unwrap();
        thread::sleep(Duration::from_millis(20));
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar"]);
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[0], Tier::Daily, 1, true, &scanner, &DryRun).unwrap();

        assert_eq!(outcome.unlinked, vec![daily.join("loop.tar")]);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_dangling_evicted_link() {
        let dir = TempDir::new().unwrap();
        let files = archive(dir.path(), Tier::Daily, &["b-1.tar", "b-2.tar"]);
        fs::remove_file(&files[0]).unwrap();
        let scanner = LinkScanner::new("*.tar").unwrap();

        let outcome = rotate_tier(&files[1], Tier::Daily, 1, true, &scanner, &LiveFs).unwrap();

        assert_eq!(outcome.unlinked.len(), 1);
        assert!(outcome.removed.is_empty());
    }
}
