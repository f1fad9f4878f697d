//! Time sources for master heartbeats.
//!
//! Connectors never read the wall clock directly. They ask a [`Clock`] for
//! the current epoch second, which lets tests pin and advance time the same
//! way against every backend.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// A source of "now", in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `seconds`.
    pub fn new(seconds: i64) -> Self {
        Self {
            seconds: AtomicI64::new(seconds),
        }
    }

    /// Move the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.seconds.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute time.
    pub fn set(&self, seconds: i64) {
        self.seconds.store(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.seconds.load(Ordering::SeqCst)
    }
}

/// Convert epoch seconds (as stored in `masters.last_active`) to a UTC
/// datetime.
pub fn epoch_to_datetime(seconds: i64) -> CoreResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0).ok_or(CoreError::TimestampOutOfRange { seconds })
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod tests;
