//! Shared builders for task unit tests.

use crate::clock::FixedClock;
use crate::schedule::TimeWindow;
use crate::task::domain::{NewTask, ProjectId, TaskId, UserId};
use chrono::{DateTime, TimeZone, Utc};

/// Returns 2025-01-`day` at `hour`:00 UTC.
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Returns a window between two instants.
pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(start, end).expect("valid window")
}

/// Returns a clock pinned at `instant`.
pub fn clock_at(instant: DateTime<Utc>) -> FixedClock {
    FixedClock::new(instant)
}

/// Builds a top-level task request.
pub fn new_task(owner_id: UserId, project_id: ProjectId, title: &str, span: TimeWindow) -> NewTask {
    NewTask {
        owner_id,
        project_id,
        parent_id: None,
        executor_id: None,
        title: title.to_owned(),
        description: None,
        window: span,
        is_urgent: false,
    }
}

/// Builds a subtask request under `parent_id`.
pub fn new_subtask(
    owner_id: UserId,
    project_id: ProjectId,
    parent_id: TaskId,
    title: &str,
    span: TimeWindow,
) -> NewTask {
    NewTask {
        parent_id: Some(parent_id),
        ..new_task(owner_id, project_id, title, span)
    }
}
