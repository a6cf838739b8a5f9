//! Filesystem effects: applied for real, or only logged in dry-run mode

use cronicle_domain::LinkEffects;
use std::fs;
use std::io;
use std::path::Path;

/// Applies every mutation to the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFs;

impl LinkEffects for LiveFs {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        tracing::debug!("Creating folder {}", dir.display());
        fs::create_dir_all(dir)
    }

    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        tracing::info!("Symlinking {} => {}", link.display(), original.display());
        std::os::unix::fs::symlink(original, link)
    }

    fn unlink(&self, link: &Path) -> io::Result<()> {
        tracing::info!("Unlinking {}", link.display());
        fs::remove_file(link)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        tracing::info!("Removing {}", path.display());
        fs::remove_file(path)
    }
}

/// Logs every mutation and applies none of them
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRun;

impl LinkEffects for DryRun {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        tracing::debug!("DRY RUN: Creating folder {}", dir.display());
        Ok(())
    }

    fn symlink(&self, original: &Path, link: &Path) -> io::Result<()> {
        tracing::info!("DRY RUN: Symlinking {} => {}", link.display(), original.display());
        Ok(())
    }

    fn unlink(&self, link: &Path) -> io::Result<()> {
        tracing::info!("DRY RUN: Unlinking {}", link.display());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        tracing::info!("DRY RUN: Removing {}", path.display());
        Ok(())
    }
}

/// Effects matching a policy's dry-run flag
pub fn for_dry_run(dry_run: bool) -> Box<dyn LinkEffects> {
    if dry_run {
        Box::new(DryRun)
    } else {
        Box::new(LiveFs)
    }
}
