//! Archive creator: add today's link to a tier folder

use crate::gate::{self, GateDecision};
use crate::{LinkScanner, RotateError};
use cronicle_domain::{Clock, LinkEffects, Tier};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What the creator did for one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A link was created (or would have been, in dry-run mode)
    Created {
        /// Path of the new link
        link: PathBuf,
        /// Gate decision that allowed it
        gate: GateDecision,
    },

    /// The tier's gap has not elapsed yet
    Gated(GateDecision),
}

/// Split an absolute file path into its directory and file name
pub(crate) fn split_file(file: &Path) -> Result<(&Path, &std::ffi::OsStr), RotateError> {
    match (file.parent(), file.file_name()) {
        (Some(dir), Some(name)) => Ok((dir, name)),
        _ => Err(RotateError::InvalidInput(file.to_path_buf())),
    }
}

/// Create `<dir>/<tier>/<name>` pointing at `file` if the tier's gap allows it
///
/// Fails with [`RotateError::Conflict`] when any entry, including a broken
/// link, already sits at the link path; that entry is left untouched.
pub fn create_archive(
    file: &Path,
    tier: Tier,
    scanner: &LinkScanner,
    clock: &dyn Clock,
    effects: &dyn LinkEffects,
) -> Result<CreateOutcome, RotateError> {
    let (dir, name) = split_file(file)?;
    let folder = tier.folder_in(dir);

    let decision = gate::check(tier, &folder, scanner, clock)?;
    if !decision.passes() {
        return Ok(CreateOutcome::Gated(decision));
    }

    let link = folder.join(name);
    if entry_exists(&link)? {
        return Err(RotateError::Conflict(link));
    }

    if !folder.is_dir() {
        effects
            .create_dir_all(&folder)
            .map_err(RotateError::io(&folder))?;
    }
    effects.symlink(file, &link).map_err(RotateError::io(&link))?;

    Ok(CreateOutcome::Created {
        link,
        gate: decision,
    })
}

/// True for any entry at `path`, dangling symlinks included
fn entry_exists(path: &Path) -> Result<bool, RotateError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RotateError::io(path)(e)),
    }
}
