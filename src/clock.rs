//! Time source abstraction
//!
//! Phase classification is a pure function of a reference instant, and
//! that instant must be injectable: permission decisions shift at exact
//! phase boundaries, so tests need to freeze time at an arbitrary point,
//! including exactly on a boundary and one tick on either side.

use chrono::{DateTime, Utc};

/// A source of the current instant.
///
/// Production code uses [`SystemClock`]; tests and the `--at` CLI flag
/// use [`FixedClock`] to pin evaluation to a chosen instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
