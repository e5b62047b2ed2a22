//! Task lifecycle status and the time-driven transition rule.

use super::ParseTaskStatusError;
use crate::schedule::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// `Waiting`, `InProgress` and `PendingReview` follow from the clock.
/// `Completed` and `Cancelled` are set by a review and never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task has not started yet.
    Waiting,
    /// The task window contains the current time.
    InProgress,
    /// The due date has passed and the task awaits a review decision.
    PendingReview,
    /// Resolved as done.
    Completed,
    /// The due date was moved by a review.
    Extended,
    /// Resolved as abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Waiting,
        Self::InProgress,
        Self::PendingReview,
        Self::Completed,
        Self::Extended,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::PendingReview => "pending_review",
            Self::Completed => "completed",
            Self::Extended => "extended",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` for statuses that time can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Derives the status for `window` at `now`.
    ///
    /// Terminal statuses are returned unchanged. Otherwise the task is
    /// waiting before its start, in progress from start to due date
    /// inclusive, and pending review afterwards. Overdue is never a separate
    /// status.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use fastcheck::schedule::TimeWindow;
    /// use fastcheck::task::domain::TaskStatus;
    ///
    /// let at = |h| Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).single().unwrap_or_default();
    /// let window = TimeWindow::new(at(9), at(17)).map_err(|e| e.to_string())?;
    ///
    /// let derive = |hour, current| TaskStatus::derive(at(hour), &window, current);
    ///
    /// assert_eq!(derive(8, TaskStatus::Waiting), TaskStatus::Waiting);
    /// assert_eq!(derive(12, TaskStatus::Waiting), TaskStatus::InProgress);
    /// assert_eq!(derive(18, TaskStatus::InProgress), TaskStatus::PendingReview);
    /// assert_eq!(derive(12, TaskStatus::Cancelled), TaskStatus::Cancelled);
    /// # Ok::<(), String>(())
    /// ```
    #[must_use]
    pub fn derive(now: DateTime<Utc>, window: &TimeWindow, current: Self) -> Self {
        if current.is_terminal() {
            return current;
        }
        if now < window.start() {
            Self::Waiting
        } else if now <= window.end() {
            Self::InProgress
        } else {
            Self::PendingReview
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "waiting" => Ok(Self::Waiting),
            "in_progress" => Ok(Self::InProgress),
            "pending_review" => Ok(Self::PendingReview),
            "completed" => Ok(Self::Completed),
            "extended" => Ok(Self::Extended),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// A status change applied to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// Status before the change.
    pub from: TaskStatus,
    /// Status after the change.
    pub to: TaskStatus,
}
