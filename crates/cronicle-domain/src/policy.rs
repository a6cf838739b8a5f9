//! Policy module - resolved per-file retention configuration

use crate::Tier;

/// Resolved retention policy for one archived file
///
/// A policy is a plain value handed to every rotation operation; nothing
/// looks configuration up on its own.
///
/// A retention count of 0 disables the tier entirely: no gating, no
/// creation, no rotation.
///
/// # Examples
///
/// ```
/// use cronicle_domain::{Policy, Tier};
///
/// let policy = Policy::new("*.tar").with_retention(Tier::Daily, 3);
/// assert_eq!(policy.retention(Tier::Daily), 3);
/// assert!(!policy.is_enabled(Tier::Weekly));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Glob selecting the links that belong to the same rotation group
    pub pattern: String,

    /// Archives kept in `daily/`
    pub daily: usize,

    /// Archives kept in `weekly/`
    pub weekly: usize,

    /// Archives kept in `monthly/`
    pub monthly: usize,

    /// Archives kept in `yearly/`
    pub yearly: usize,

    /// Delete the target file of an evicted link once no other tier references it
    pub remove: bool,

    /// Log mutations instead of applying them
    pub dry_run: bool,
}

impl Default for Policy {
    /// Policy used when nothing more specific applies: every tier disabled,
    /// pattern `*`.
    fn default() -> Self {
        Self::new("*")
    }
}

impl Policy {
    /// Create a policy for `pattern` with every tier disabled
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            daily: 0,
            weekly: 0,
            monthly: 0,
            yearly: 0,
            remove: false,
            dry_run: false,
        }
    }

    /// Builder-style setter for one tier's retention count
    pub fn with_retention(mut self, tier: Tier, count: usize) -> Self {
        *self.retention_mut(tier) = count;
        self
    }

    /// Builder-style setter for the removal permission
    pub fn with_remove(mut self, remove: bool) -> Self {
        self.remove = remove;
        self
    }

    /// Builder-style setter for dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Retention count of a tier
    pub fn retention(&self, tier: Tier) -> usize {
        match tier {
            Tier::Daily => self.daily,
            Tier::Weekly => self.weekly,
            Tier::Monthly => self.monthly,
            Tier::Yearly => self.yearly,
        }
    }

    fn retention_mut(&mut self, tier: Tier) -> &mut usize {
        match tier {
            Tier::Daily => &mut self.daily,
            Tier::Weekly => &mut self.weekly,
            Tier::Monthly => &mut self.monthly,
            Tier::Yearly => &mut self.yearly,
        }
    }

    /// Whether a tier takes part in rotation
    pub fn is_enabled(&self, tier: Tier) -> bool {
        self.retention(tier) > 0
    }

    /// Enabled tiers, in processing order
    pub fn enabled_tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        Tier::ALL.into_iter().filter(move |t| self.is_enabled(*t))
    }
}
