//! Cronicle Domain Layer
//!
//! This crate contains the core vocabulary of Cronicle: frequency tiers,
//! per-file retention policies and the records describing archive links.
//! It has ZERO external dependencies and defines the trait seams
//! (clock, filesystem effects) that the rotation engine is driven through.
//!
//! ## Key Concepts
//!
//! - **Tier**: a frequency class (daily → weekly → monthly → yearly) with a
//!   minimum gap between two archives
//! - **Policy**: the resolved configuration for one file (pattern, retention
//!   counts, removal permission, dry-run)
//! - **Archive**: a symlink inside a tier folder pointing at one version of a file
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - No filesystem access: I/O lives in `cronicle-rotator`
//! - Trait definitions for every side effect

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod policy;
pub mod record;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use policy::Policy;
pub use record::SymlinkRecord;
pub use tier::Tier;
pub use traits::{Clock, LinkEffects};
