//! Per-run report of what each tier did

use crate::{CreateOutcome, RotationOutcome};
use cronicle_domain::Tier;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What happened to one tier during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierReport {
    /// Link created this run
    pub created: Option<PathBuf>,

    /// Days since the previous archive, when there was one
    pub elapsed_days: Option<u64>,

    /// Creation skipped because the tier's gap had not elapsed
    pub gated: bool,

    /// Creation skipped because this path was already occupied
    pub conflict: Option<PathBuf>,

    /// Links left after rotation
    pub kept: usize,

    /// Links evicted by rotation
    pub unlinked: Vec<PathBuf>,

    /// Target files deleted by rotation
    pub removed: Vec<PathBuf>,

    /// Target files spared because another tier links to them
    pub still_referenced: Vec<PathBuf>,
}

impl TierReport {
    /// Record the creator's outcome
    pub fn record_creation(&mut self, outcome: CreateOutcome) {
        match outcome {
            CreateOutcome::Created { link, gate } => {
                self.created = Some(link);
                self.elapsed_days = gate.elapsed_days();
            }
            CreateOutcome::Gated(gate) => {
                self.gated = true;
                self.elapsed_days = gate.elapsed_days();
            }
        }
    }

    /// Record a conflicting entry at the link path
    pub fn record_conflict(&mut self, link: PathBuf) {
        self.conflict = Some(link);
    }

    /// Record the rotation outcome
    pub fn record_rotation(&mut self, outcome: RotationOutcome) {
        self.kept = outcome.kept;
        self.unlinked = outcome.unlinked;
        self.removed = outcome.removed;
        self.still_referenced = outcome.still_referenced;
    }
}

/// Report for one file across every enabled tier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// The archived file
    pub file: PathBuf,

    /// Whether mutations were only logged
    ///
    /// Rotation counts of a dry run cover the links already on disk; the
    /// link a tier would have gained this run is not among them.
    pub dry_run: bool,

    /// Enabled tiers, in processing order
    pub tiers: BTreeMap<Tier, TierReport>,
}

impl RunReport {
    /// Create an empty report
    pub fn new(file: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            file: file.into(),
            dry_run,
            tiers: BTreeMap::new(),
        }
    }

    /// Mutable report of a tier, created on first use
    pub fn tier_mut(&mut self, tier: Tier) -> &mut TierReport {
        self.tiers.entry(tier).or_default()
    }

    /// Report of a tier, if it was processed
    pub fn tier(&self, tier: Tier) -> Option<&TierReport> {
        self.tiers.get(&tier)
    }

    /// Links created across all tiers
    pub fn created(&self) -> Vec<&PathBuf> {
        self.tiers.values().filter_map(|t| t.created.as_ref()).collect()
    }

    /// Get total links evicted across all tiers
    pub fn total_unlinked(&self) -> usize {
        self.tiers.values().map(|t| t.unlinked.len()).sum()
    }

    /// Get total target files deleted across all tiers
    pub fn total_removed(&self) -> usize {
        self.tiers.values().map(|t| t.removed.len()).sum()
    }

    /// Get number of tiers whose link path was occupied
    pub fn total_conflicts(&self) -> usize {
        self.tiers.values().filter(|t| t.conflict.is_some()).count()
    }

    /// Whether no tier was enabled for the file
    pub fn is_noop(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Rotation of {}", self.file.display()),
            format!("{}", "=".repeat(12 + self.file.as_os_str().len())),
        ];
        if self.dry_run {
            lines.push("Dry run: nothing was written".to_string());
        }
        lines.push(String::new());

        for (tier, report) in &self.tiers {
            let action = match (&report.created, &report.conflict, report.gated) {
                (Some(_), _, _) => "created".to_string(),
                (_, Some(_), _) => "conflict".to_string(),
                (_, _, true) => format!("too soon ({}d)", report.elapsed_days.unwrap_or(0)),
                _ => "-".to_string(),
            };
            lines.push(format!(
                "  {}: {}, kept {}, unlinked {}, removed {}",
                tier,
                action,
                report.kept,
                report.unlinked.len(),
                report.removed.len()
            ));
        }

        lines.push(String::new());
        lines.push(format!("  Created: {}", self.created().len()));
        lines.push(format!("  Unlinked: {}", self.total_unlinked()));
        lines.push(format!("  Removed: {}", self.total_removed()));

        lines.join("\n")
    }
}
