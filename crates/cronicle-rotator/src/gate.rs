//! Tier gate: is a new archive due?

use crate::clock::days_between;
use crate::{LinkScanner, RotateError};
use cronicle_domain::{Clock, Tier};
use std::path::Path;

/// Outcome of checking a tier's minimum gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The tier holds no archive yet
    Unconstrained,

    /// The newest archive is at least the tier's gap old
    Due {
        /// Whole days since the newest archive
        elapsed_days: u64,
    },

    /// The newest archive is younger than the tier's gap
    TooSoon {
        /// Whole days since the newest archive
        elapsed_days: u64,
        /// Gap the tier requires
        min_gap_days: u64,
    },
}

impl GateDecision {
    /// Whether a new archive may be created
    pub fn passes(&self) -> bool {
        !matches!(self, GateDecision::TooSoon { .. })
    }

    /// Days since the newest archive, if there is one
    pub fn elapsed_days(&self) -> Option<u64> {
        match self {
            GateDecision::Unconstrained => None,
            GateDecision::Due { elapsed_days } | GateDecision::TooSoon { elapsed_days, .. } => {
                Some(*elapsed_days)
            }
        }
    }
}

/// Check `tier`'s gap against the newest archive in `folder`
pub fn check(
    tier: Tier,
    folder: &Path,
    scanner: &LinkScanner,
    clock: &dyn Clock,
) -> Result<GateDecision, RotateError> {
    let Some(latest) = scanner.latest(folder)? else {
        return Ok(GateDecision::Unconstrained);
    };

    let elapsed_days = days_between(latest.created, clock.now());
    let min_gap_days = tier.min_gap_days();

    if elapsed_days < min_gap_days {
        tracing::info!(
            "No {} symlink created: last archive is {} day(s) old, {} required",
            tier,
            elapsed_days,
            min_gap_days
        );
        return Ok(GateDecision::TooSoon {
            elapsed_days,
            min_gap_days,
        });
    }

    Ok(GateDecision::Due { elapsed_days })
}
