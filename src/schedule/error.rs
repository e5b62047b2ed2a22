//! Error types for schedule validation.

use super::TimeWindow;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while validating task and project dates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The window does not end after it starts.
    #[error("start {start} must be before end {end}")]
    EmptyWindow {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// The window leaves the bounds of its parent project or task.
    #[error("window {window} is outside parent bounds {parent}")]
    OutsideParent {
        /// Requested window.
        window: TimeWindow,
        /// Bounds of the parent.
        parent: TimeWindow,
    },
}
