//! Validated half-open time interval.

use super::ScheduleError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interval `[start, end)` with `start < end`.
///
/// Task windows run from `start_date` to `due_date`; project windows run from
/// `start_date` to `planned_finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ScheduleError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<TimeWindow> for RawWindow {
    fn from(window: TimeWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

impl TimeWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyWindow`] unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a window from bounds already known to be ordered, such as
    /// consecutive local midnights.
    pub(super) fn from_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        debug_assert!(start < end, "window bounds must be ordered");
        Self { start, end }
    }

    /// Returns the inclusive start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns a copy with a different end.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::EmptyWindow`] when `end` is not after the
    /// current start.
    pub fn with_end(&self, end: DateTime<Utc>) -> Result<Self, ScheduleError> {
        Self::new(self.start, end)
    }

    /// Half-open overlap test.
    ///
    /// Windows that merely touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns `true` when `other` lies entirely inside this window.
    #[must_use]
    pub fn contains_window(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` when `instant` lies inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns the intersection of two windows, if it is non-empty.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        Self::new(self.start.max(other.start), self.end.min(other.end)).ok()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
