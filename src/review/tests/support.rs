//! Shared builders for review unit tests.

use crate::clock::FixedClock;
use crate::schedule::TimeWindow;
use crate::task::domain::{NewTask, ProjectId, Task, TaskStatus, UserId};
use chrono::{DateTime, TimeZone, Utc};

/// Returns 2025-01-`day` at `hour`:`minute` UTC.
pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a task for `owner_id` whose status is current at `now`.
pub fn task_at(
    owner_id: UserId,
    start: DateTime<Utc>,
    due: DateTime<Utc>,
    is_urgent: bool,
    now: DateTime<Utc>,
) -> Task {
    let clock = FixedClock::new(start);
    let mut task = Task::new(
        NewTask {
            owner_id,
            project_id: ProjectId::new(),
            parent_id: None,
            executor_id: None,
            title: "Submit expenses".to_owned(),
            description: None,
            window: TimeWindow::new(start, due).expect("valid window"),
            is_urgent,
        },
        &clock,
    )
    .expect("valid task");
    clock.set(now);
    task.refresh_status(&clock);
    task
}

/// Builds a task that has been pending review since `due`.
pub fn pending_task(
    owner_id: UserId,
    due: DateTime<Utc>,
    is_urgent: bool,
    now: DateTime<Utc>,
) -> Task {
    let task = task_at(owner_id, due - chrono::TimeDelta::hours(2), due, is_urgent, now);
    debug_assert_eq!(task.status(), TaskStatus::PendingReview);
    task
}
