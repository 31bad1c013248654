//! Fixed clock for deterministic tests.

use crate::clock::Clock;
use chrono::{DateTime, Utc};

/// Clock that always returns the same instant, making expiry checks
/// reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock pinned to `time`.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// A clock pinned to 2024-01-01T00:00:00Z, the conventional instant used
/// across this workspace's tests.
#[must_use]
pub fn test_clock() -> FixedClock {
    FixedClock::new(DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default())
}
