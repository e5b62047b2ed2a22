//! Per-user review settings.

use super::ReviewDomainError;
use crate::task::domain::UserId;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

const REVIEW_TIME_FORMAT: &str = "%H:%M";

/// Daily review time and notification preference for one user.
///
/// # Examples
///
/// ```
/// use fastcheck::review::domain::ReviewSettings;
/// use fastcheck::task::domain::UserId;
///
/// let settings = ReviewSettings::parse(UserId::new(), "18:30", true)
///     .map_err(|e| e.to_string())?;
/// assert_eq!(settings.review_time_label(), "18:30");
/// # Ok::<(), String>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettings {
    /// Owning user.
    pub owner_id: UserId,
    /// Local time of day when the daily review becomes due.
    pub review_time: NaiveTime,
    /// Whether the user wants push notifications for pending reviews.
    pub push_notifications: bool,
}

impl ReviewSettings {
    /// Creates settings.
    #[must_use]
    pub const fn new(owner_id: UserId, review_time: NaiveTime, push_notifications: bool) -> Self {
        Self {
            owner_id,
            review_time,
            push_notifications,
        }
    }

    /// Creates settings from an `HH:MM` review time.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::InvalidReviewTime`] when `review_time` is
    /// not `HH:MM`.
    pub fn parse(
        owner_id: UserId,
        review_time: &str,
        push_notifications: bool,
    ) -> Result<Self, ReviewDomainError> {
        let parsed = NaiveTime::parse_from_str(review_time.trim(), REVIEW_TIME_FORMAT)
            .map_err(|_| ReviewDomainError::InvalidReviewTime(review_time.to_owned()))?;
        Ok(Self::new(owner_id, parsed, push_notifications))
    }

    /// Returns the review time formatted as `HH:MM`.
    #[must_use]
    pub fn review_time_label(&self) -> String {
        self.review_time.format(REVIEW_TIME_FORMAT).to_string()
    }
}
