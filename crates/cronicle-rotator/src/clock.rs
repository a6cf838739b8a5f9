//! Clock implementations

use cronicle_domain::Clock;
use std::time::{Duration, SystemTime};

/// Seconds in one day, the unit of every tier gap
pub const SECS_PER_DAY: u64 = 86_400;

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at a given instant
///
/// Lets a run be evaluated "N days later" without waiting.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SystemTime);

impl FixedClock {
    /// Clock set `days` days after the current wall-clock time
    pub fn days_from_now(days: u64) -> Self {
        Self(SystemTime::now() + Duration::from_secs(days * SECS_PER_DAY))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

/// Whole days from `then` to `now`; 0 when `then` lies in the future
pub fn days_between(then: SystemTime, now: SystemTime) -> u64 {
    now.duration_since(then)
        .map(|elapsed| elapsed.as_secs() / SECS_PER_DAY)
        .unwrap_or(0)
}
