//! Source of "now".
//!
//! Validation that depends on the current instant (future-date checks,
//! default timestamps, "is today") takes a `Clock` so tests can pin time.

use super::DateTime;

/// Provides the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        DateTime::from(chrono::Utc::now())
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime,
}

impl FixedClock {
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.now
    }
}
