//! Visual escalation of tasks awaiting review.

use crate::schedule::calendar;
use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Utc};

/// When a pending task starts being highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationRule {
    /// Highlight once the task has been overdue for at least this long.
    AfterOverdue(TimeDelta),
    /// Highlight once the review time has passed on the due date's local day.
    AtReviewTime {
        /// Local review time.
        review_time: NaiveTime,
        /// Offset defining the local day.
        offset: FixedOffset,
    },
}

/// Escalation state of a task at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrgencyStatus {
    /// Time elapsed since the due date; zero when not yet due.
    pub overdue_by: TimeDelta,
    /// Whether the task should be visually escalated.
    pub should_highlight: bool,
}

/// Assesses whether `task` should be highlighted at `now`.
///
/// Only `pending_review` tasks are ever highlighted.
#[must_use]
pub fn assess_urgency(task: &Task, now: DateTime<Utc>, rule: &EscalationRule) -> UrgencyStatus {
    let overdue_by = (now - task.due_date()).max(TimeDelta::zero());
    if task.status() != TaskStatus::PendingReview {
        return UrgencyStatus {
            overdue_by,
            should_highlight: false,
        };
    }

    let should_highlight = match *rule {
        EscalationRule::AfterOverdue(threshold) => overdue_by >= threshold,
        EscalationRule::AtReviewTime {
            review_time,
            offset,
        } => {
            let due_day = calendar::local_date(task.due_date(), offset);
            now >= calendar::at_local_time(due_day, review_time, offset)
        }
    };

    UrgencyStatus {
        overdue_by,
        should_highlight,
    }
}
