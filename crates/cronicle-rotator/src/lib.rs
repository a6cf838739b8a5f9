//! Cronicle Rotator
//!
//! Keeps a bounded set of dated symlinks pointing at successive versions of a
//! file, organized in frequency tiers.
//!
//! # Overview
//!
//! For every enabled tier of a [`Policy`](cronicle_domain::Policy) the rotator:
//! - **Gates**: skips the tier if its newest archive is younger than the tier's gap
//! - **Archives**: links `<dir>/<tier>/<name>` to the absolute file path
//! - **Rotates**: evicts links beyond the retention count, oldest first
//! - **Removes**: deletes an evicted link's target once no other tier links to it
//!
//! ## Tier Gaps
//!
//! | Tier | Folder | Minimum gap |
//! |------|--------|-------------|
//! | **Daily** | `daily/` | 1 day |
//! | **Weekly** | `weekly/` | 7 days |
//! | **Monthly** | `monthly/` | 30 days |
//! | **Yearly** | `yearly/` | 365 days |
//!
//! A retention count of 0 disables a tier.
//!
//! # Usage
//!
//! ```no_run
//! use cronicle_domain::{Policy, Tier};
//! use cronicle_rotator::Rotator;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = Policy::new("*.tar")
//!     .with_retention(Tier::Daily, 7)
//!     .with_retention(Tier::Weekly, 4)
//!     .with_remove(true);
//!
//! let report = Rotator::new(policy)?.run(Path::new("/srv/backups/db-2024-06-01.tar"))?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Dry Run
//!
//! With `Policy::dry_run` set every mutation goes through [`DryRun`], which
//! logs it and leaves the filesystem untouched. Scans, gates and reference
//! checks still run against the real tree, so rotation after a simulated
//! creation does not count the link that was never written.
//!
//! # Concurrency
//!
//! None. A run is sequential and assumes exclusive access to the folders; it
//! is not atomic, and a failed run leaves the tiers it already processed as
//! they are.

#![warn(missing_docs)]

mod error;
mod clock;
mod effects;
mod scanner;
mod gate;
mod creator;
mod rotation;
mod report;
mod rotator;

pub use error::RotateError;
pub use clock::{days_between, FixedClock, SystemClock, SECS_PER_DAY};
pub use effects::{for_dry_run, DryRun, LiveFs};
pub use scanner::{resolve_target, LinkScanner};
pub use gate::GateDecision;
pub use creator::CreateOutcome;
pub use rotation::{is_referenced, RotationOutcome};
pub use report::{RunReport, TierReport};
pub use rotator::Rotator;
