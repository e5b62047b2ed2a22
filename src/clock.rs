//! Deterministic clock for tests, simulations and replays.
//!
//! Services receive their notion of "now" through [`mockable::Clock`]. The
//! production binary uses [`mockable::DefaultClock`]; [`FixedClock`] pins the
//! current instant so status derivation and review-time checks can be
//! exercised at exact moments.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{PoisonError, RwLock};

/// Clock that reports a settable instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use fastcheck::clock::FixedClock;
/// use mockable::Clock;
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).single().unwrap_or_default();
/// let clock = FixedClock::new(start);
/// clock.advance(TimeDelta::hours(3));
/// assert_eq!(clock.utc(), start + TimeDelta::hours(3));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock pinned at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *guard += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}
