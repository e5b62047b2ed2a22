//! Review queue selection and the daily review prompt.

use crate::schedule::calendar;
use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Task selected for review with its overdue day count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCandidate {
    /// Task to review.
    pub task: Task,
    /// Whole days since the due date; zero when not yet due.
    pub overdue_days: i64,
}

/// Returns `true` when `task` belongs in the review queue at `now`.
///
/// Resolved tasks never qualify. Open tasks qualify when they are pending
/// review, when they are in progress past their due date, or when they are
/// flagged urgent.
#[must_use]
pub fn needs_review(task: &Task, now: DateTime<Utc>) -> bool {
    let status = task.status();
    if status.is_terminal() {
        return false;
    }
    let past_due = task.due_date() < now
        && matches!(status, TaskStatus::PendingReview | TaskStatus::InProgress);
    past_due || task.is_urgent() || status == TaskStatus::PendingReview
}

/// Selects review candidates ordered by due date.
#[must_use]
pub fn select_for_review(tasks: Vec<Task>, now: DateTime<Utc>) -> Vec<ReviewCandidate> {
    let mut candidates: Vec<ReviewCandidate> = tasks
        .into_iter()
        .filter(|task| needs_review(task, now))
        .map(|task| {
            let overdue_days = (now - task.due_date()).num_days().max(0);
            ReviewCandidate { task, overdue_days }
        })
        .collect();
    candidates.sort_by_key(|candidate| candidate.task.due_date());
    candidates
}

/// Returns `true` when the daily review prompt should be shown.
///
/// The prompt is due once today's local review time has passed and no review
/// has been logged since local midnight.
#[must_use]
pub fn daily_review_due(
    now: DateTime<Utc>,
    review_time: NaiveTime,
    offset: FixedOffset,
    reviewed_today: bool,
) -> bool {
    if reviewed_today {
        return false;
    }
    let today = calendar::local_date(now, offset);
    now >= calendar::at_local_time(today, review_time, offset)
}
