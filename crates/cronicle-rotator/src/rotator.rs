//! Orchestrator: archive and rotate one file across every enabled tier

use crate::clock::SystemClock;
use crate::creator::{self, CreateOutcome};
use crate::rotation::{self, RotationOutcome};
use crate::{effects, LinkScanner, RotateError, RunReport};
use cronicle_domain::{Clock, LinkEffects, Policy, Tier};
use std::path::{Path, PathBuf};

/// Rotation service for one resolved policy
///
/// Responsible for:
/// - Gating each tier on its minimum gap
/// - Creating the tier's new archive link
/// - Trimming the tier to its retention count
/// - Deleting unreferenced targets when the policy allows it
///
/// # Examples
///
/// ```no_run
/// use cronicle_domain::{Policy, Tier};
/// use cronicle_rotator::Rotator;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = Policy::new("*.tar").with_retention(Tier::Daily, 7);
/// let rotator = Rotator::new(policy)?;
///
/// let report = rotator.run(Path::new("/srv/backups/backup-2024-01-01.tar"))?;
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
pub struct Rotator {
    policy: Policy,
    scanner: LinkScanner,
    clock: Box<dyn Clock>,
    effects: Box<dyn LinkEffects>,
}

impl Rotator {
    /// Create a rotator for `policy`, on the wall clock, with effects
    /// matching the policy's dry-run flag
    pub fn new(policy: Policy) -> Result<Self, RotateError> {
        let scanner = LinkScanner::new(&policy.pattern)?;
        let effects = effects::for_dry_run(policy.dry_run);
        Ok(Self {
            policy,
            scanner,
            clock: Box::new(SystemClock),
            effects,
        })
    }

    /// Replace the clock gates are evaluated against
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Archive and rotate `file` in every enabled tier
    ///
    /// Tiers run in fixed order. A conflicting entry at a tier's link path is
    /// logged and only skips that tier's creation; any filesystem error aborts
    /// the run, leaving earlier tiers' changes in place.
    pub fn run(&self, file: &Path) -> Result<RunReport, RotateError> {
        let file = absolute(file)?;
        let mut report = RunReport::new(&file, self.policy.dry_run);

        if self.policy.enabled_tiers().next().is_none() {
            tracing::info!("Every tier is disabled for {}", file.display());
            return Ok(report);
        }

        for tier in self.policy.enabled_tiers() {
            let tier_report = report.tier_mut(tier);

            match self.archive(&file, tier) {
                Ok(outcome) => tier_report.record_creation(outcome),
                Err(RotateError::Conflict(link)) => {
                    tracing::error!("{} already exists", link.display());
                    tier_report.record_conflict(link);
                }
                Err(e) => return Err(e),
            }

            tier_report.record_rotation(self.rotate(&file, tier)?);
        }

        Ok(report)
    }

    /// Create `tier`'s archive link for `file` if due
    pub fn archive(&self, file: &Path, tier: Tier) -> Result<CreateOutcome, RotateError> {
        creator::create_archive(
            file,
            tier,
            &self.scanner,
            self.clock.as_ref(),
            self.effects.as_ref(),
        )
    }

    /// Trim `tier` next to `file` to the policy's retention count
    pub fn rotate(&self, file: &Path, tier: Tier) -> Result<RotationOutcome, RotateError> {
        rotation::rotate_tier(
            file,
            tier,
            self.policy.retention(tier),
            self.policy.remove,
            &self.scanner,
            self.effects.as_ref(),
        )
    }
}

fn absolute(file: &Path) -> Result<PathBuf, RotateError> {
    std::path::absolute(file).map_err(RotateError::io(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::gate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_all_tiers_disabled_is_noop() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("backup.tar");
        fs::write(&file, b"x").unwrap();

        let rotator = Rotator::new(Policy::new("*.tar")).unwrap();
        let report = rotator.run(&file).unwrap();

        assert!(report.is_noop());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_only_enabled_tiers_run() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("backup.tar");
        fs::write(&file, b"x").unwrap();

        let policy = Policy::new("*.tar")
            .with_retention(Tier::Daily, 2)
            .with_retention(Tier::Monthly, 1);
        let report = Rotator::new(policy).unwrap().run(&file).unwrap();

        let tiers: Vec<Tier> = report.tiers.keys().copied().collect();
        assert_eq!(tiers, vec![Tier::Daily, Tier::Monthly]);
        assert!(dir.path().join("daily").join("backup.tar").is_symlink());
        assert!(dir.path().join("monthly").join("backup.tar").is_symlink());
        assert!(!dir.path().join("weekly").exists());
    }

    #[test]
    fn test_conflict_does_not_stop_other_tiers() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("backup.tar");
        fs::write(&file, b"x").unwrap();
        fs::create_dir(dir.path().join("daily")).unwrap();
        // A regular file is invisible to the gate but still occupies the link path
        fs::write(dir.path().join("daily").join("backup.tar"), b"squatter").unwrap();

        let policy = Policy::new("*.tar")
            .with_retention(Tier::Daily, 2)
            .with_retention(Tier::Weekly, 2);
        let report = Rotator::new(policy).unwrap().run(&file).unwrap();

        assert_eq!(report.total_conflicts(), 1);
        assert!(report.tier(Tier::Daily).unwrap().conflict.is_some());
        assert!(report.tier(Tier::Weekly).unwrap().created.is_some());
        assert_eq!(
            fs::read(dir.path().join("daily").join("backup.tar")).unwrap(),
            b"squatter"
        );
    }

    #[test]
    fn test_gate_uses_injected_clock() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("backup.tar");
        fs::write(&file, b"x").unwrap();
        let policy = Policy::new("*.tar").with_retention(Tier::Weekly, 1);

        Rotator::new(policy.clone()).unwrap().run(&file).unwrap();

        let later = Rotator::new(policy).unwrap().with_clock(FixedClock::days_from_now(10));
        let weekly = Tier::Weekly.folder_in(dir.path());
        assert!(gate::check(Tier::Weekly, &weekly, &later.scanner, later.clock.as_ref())
            .unwrap()
            .passes());
        let outcome = later.archive(&file, Tier::Monthly).unwrap();
        assert!(matches!(outcome, CreateOutcome::Created { .. }));
    }
}
