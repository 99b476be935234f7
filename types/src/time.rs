//! Timestamps and the injectable clock.
//!
//! Timestamps are Unix epoch milliseconds (UTC). Everything that reads the
//! time goes through [`Clock`] so tests can drive it deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// A system clock set before the epoch reads as [`Timestamp::EPOCH`].
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates() {
        let later = Timestamp::new(500);
        assert_eq!(later.elapsed_since(Timestamp::new(100)), 0);
        assert_eq!(Timestamp::new(100).elapsed_since(later), 400);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now() > Timestamp::EPOCH);
    }

    #[test]
    fn display_in_millis() {
        assert_eq!(Timestamp::new(42).to_string(), "42ms");
    }
}
