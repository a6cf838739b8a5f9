//! Tier module - frequency classes for archives

use std::fmt;
use std::path::Path;

/// Frequency tier of an archive
///
/// Each tier owns a subfolder next to the archived file and only accepts a
/// new archive once its minimum gap has elapsed:
/// - Daily: 1 day
/// - Weekly: 7 days
/// - Monthly: 30 days
/// - Yearly: 365 days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// One archive per day at most
    Daily,

    /// One archive per week at most
    Weekly,

    /// One archive per 30 days at most
    Monthly,

    /// One archive per 365 days at most
    Yearly,
}

impl Tier {
    /// All tiers, in processing order
    pub const ALL: [Tier; 4] = [Tier::Daily, Tier::Weekly, Tier::Monthly, Tier::Yearly];

    /// Get the tier name as a string (also the name of its folder)
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Daily => "daily",
            Tier::Weekly => "weekly",
            Tier::Monthly => "monthly",
            Tier::Yearly => "yearly",
        }
    }

    /// Minimum number of days between two archives of this tier
    pub fn min_gap_days(&self) -> u64 {
        match self {
            Tier::Daily => 1,
            Tier::Weekly => 7,
            Tier::Monthly => 30,
            Tier::Yearly => 365,
        }
    }

    /// Folder holding this tier's archives for files living in `dir`
    pub fn folder_in(&self, dir: &Path) -> std::path::PathBuf {
        dir.join(self.as_str())
    }

    /// Every tier except this one
    pub fn others(self) -> impl Iterator<Item = Tier> {
        Tier::ALL.into_iter().filter(move |t| *t != self)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
