//! Time sources for rule evaluation.
//!
//! Rules never read the wall clock on their own behalf except through a
//! [`Clock`], so callers that need deterministic results can inject one.

use chrono::{DateTime, Local};

/// Source of the current local instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in the local time zone
    fn now(&self) -> DateTime<Local>;
}

/// Reads the live system clock on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    pub const fn new(instant: DateTime<Local>) -> Self {
        Self(instant)
    }

    /// Returns the stored instant
    pub const fn instant(&self) -> DateTime<Local> {
        self.0
    }
}

impl From<DateTime<Local>> for FixedClock {
    fn from(instant: DateTime<Local>) -> Self {
        Self::new(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
