//! Service tests for the review queue, daily prompt and escalation.

use std::sync::Arc;

use super::support::{at, pending_task, task_at};
use crate::clock::FixedClock;
use crate::config::TrackerConfig;
use crate::review::{
    adapters::memory::{InMemoryReviewLogRepository, InMemorySettingsRepository},
    domain::{ReviewDecision, ReviewLog, ReviewSettings},
    ports::{
        MockSettingsRepository, ReviewLogRepository, SettingsRepository,
        SettingsRepositoryError,
    },
    services::{ReviewQueueError, ReviewQueueService},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskStatus, UserId},
    ports::TaskRepository,
};
use chrono::{FixedOffset, NaiveTime, TimeDelta};
use mockable::Clock;
use rstest::{fixture, rstest};

type TestService = ReviewQueueService<
    InMemoryTaskRepository,
    InMemoryReviewLogRepository,
    InMemorySettingsRepository,
    FixedClock,
>;

struct Queue {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
    logs: Arc<InMemoryReviewLogRepository>,
    settings: Arc<InMemorySettingsRepository>,
    clock: Arc<FixedClock>,
    owner_id: UserId,
}

#[fixture]
fn queue() -> Queue {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let logs = Arc::new(InMemoryReviewLogRepository::new());
    let settings = Arc::new(InMemorySettingsRepository::new());
    let clock = Arc::new(FixedClock::new(at(10, 8, 0)));
    Queue {
        service: ReviewQueueService::new(
            Arc::clone(&tasks),
            Arc::clone(&logs),
            Arc::clone(&settings),
            Arc::clone(&clock),
        ),
        tasks,
        logs,
        settings,
        clock,
        owner_id: UserId::new(),
    }
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_queue_lists_owner_tasks_oldest_first(queue: Queue) {
    let now = queue.clock.utc();
    let older = pending_task(queue.owner_id, at(7, 17, 0), false, now);
    let newer = pending_task(queue.owner_id, at(9, 17, 0), false, now);
    let upcoming = task_at(queue.owner_id, at(11, 9, 0), at(12, 17, 0), false, now);
    let someone_else = pending_task(UserId::new(), at(8, 17, 0), false, now);
    for task in [&newer, &upcoming, &older, &someone_else] {
        queue.tasks.store(task).await.expect("store task");
    }

    let candidates = queue
        .service
        .get_tasks_for_review(queue.owner_id)
        .await
        .expect("queue loads");

    let ids: Vec<_> = candidates.iter().map(|candidate| candidate.task.id()).collect();
    assert_eq!(ids, vec![older.id(), newer.id()]);
    assert_eq!(candidates.first().map(|c| c.overdue_days), Some(2));
}

#[rstest]
#[case::before_review_time(at(10, 8, 59), false)]
#[case::at_review_time(at(10, 9, 0), true)]
#[case::later_that_day(at(10, 21, 0), true)]
#[tokio::test(flavor = "multi_thread")]
async fn daily_review_appears_after_default_review_time(
    queue: Queue,
    #[case] now: chrono::DateTime<chrono::Utc>,
    #[case] expected: bool,
) {
    queue.clock.set(now);

    let due = queue
        .service
        .should_show_daily_review(queue.owner_id)
        .await
        .expect("query succeeds");

    assert_eq!(due, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_review_is_hidden_once_reviewed_today(queue: Queue) {
    let task = pending_task(queue.owner_id, at(9, 17, 0), false, at(10, 8, 0));
    queue.clock.set(at(10, 9, 30));
    let entry = ReviewLog::record(&task, &ReviewDecision::Completed, None, &*queue.clock);
    queue.logs.append(&entry).await.expect("append log");

    let due = queue
        .service
        .should_show_daily_review(queue.owner_id)
        .await
        .expect("query succeeds");
    assert!(!due);

    queue.clock.set(at(11, 9, 30));
    let next_day = queue
        .service
        .should_show_daily_review(queue.owner_id)
        .await
        .expect("query succeeds");
    assert!(next_day);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_review_follows_saved_review_time(queue: Queue) {
    queue
        .service
        .save_settings(&ReviewSettings::new(queue.owner_id, time(18, 30), false))
        .await
        .expect("save settings");
    queue.clock.set(at(10, 12, 0));

    let due = queue
        .service
        .should_show_daily_review(queue.owner_id)
        .await
        .expect("query succeeds");

    assert!(!due);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_offset_moves_the_review_day(queue: Queue) {
    let mut config = TrackerConfig::default();
    config.calendar.utc_offset = FixedOffset::east_opt(3 * 3600).expect("valid offset");
    let service = queue.service.with_config(&config);
    queue.clock.set(at(10, 6, 30));

    let due = service
        .should_show_daily_review(queue.owner_id)
        .await
        .expect("query succeeds");

    assert!(due, "09:30 local time is past the default review time");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settings_default_when_never_saved(queue: Queue) {
    let settings = queue
        .service
        .get_settings(queue.owner_id)
        .await
        .expect("settings load");

    assert_eq!(settings.review_time, time(9, 0));
    assert!(!settings.push_notifications);
    assert_eq!(queue.settings.find(queue.owner_id).await.expect("lookup"), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_settings_are_returned(queue: Queue) {
    let saved = ReviewSettings::new(queue.owner_id, time(7, 15), true);
    queue.service.save_settings(&saved).await.expect("save");

    let loaded = queue
        .service
        .get_settings(queue.owner_id)
        .await
        .expect("settings load");

    assert_eq!(loaded, saved);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn urgent_tasks_escalate_after_an_hour(queue: Queue) {
    let task = pending_task(queue.owner_id, at(10, 7, 30), true, at(10, 8, 0));

    let early = queue.service.get_task_urgency_status(&task).await;
    assert!(!early.should_highlight);
    assert_eq!(early.overdue_by, TimeDelta::minutes(30));

    queue.clock.set(at(10, 8, 30));
    let late = queue.service.get_task_urgency_status(&task).await;
    assert!(late.should_highlight);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn regular_tasks_escalate_at_review_time_on_due_day(queue: Queue) {
    queue
        .settings
        .save(&ReviewSettings::new(queue.owner_id, time(12, 0), false))
        .await
        .expect("save settings");
    let task = pending_task(queue.owner_id, at(10, 7, 0), false, at(10, 8, 0));

    let before = queue.service.get_task_urgency_status(&task).await;
    queue.clock.set(at(10, 12, 0));
    let after = queue.service.get_task_urgency_status(&task).await;

    assert!(!before.should_highlight);
    assert!(after.should_highlight);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_pending_tasks_are_never_highlighted(queue: Queue) {
    let task = task_at(queue.owner_id, at(9, 9, 0), at(11, 17, 0), true, at(10, 8, 0));
    assert_eq!(task.status(), TaskStatus::InProgress);

    let status = queue.service.get_task_urgency_status(&task).await;

    assert!(!status.should_highlight);
    assert_eq!(status.overdue_by, TimeDelta::zero());
}

#[rstest]
#[case::within_a_day(at(11, 8, 0), false)]
#[case::a_day_overdue(at(11, 9, 0), true)]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_settings_fall_back_to_a_day_overdue(
    #[case] now: chrono::DateTime<chrono::Utc>,
    #[case] expected: bool,
) {
    let owner_id = UserId::new();
    let mut settings = MockSettingsRepository::new();
    settings.expect_find().returning(|_| {
        Err(SettingsRepositoryError::persistence(std::io::Error::other(
            "settings table unavailable",
        )))
    });
    let clock = Arc::new(FixedClock::new(now));
    let service = ReviewQueueService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryReviewLogRepository::new()),
        Arc::new(settings),
        Arc::clone(&clock),
    );
    let task = pending_task(owner_id, at(10, 9, 0), false, at(10, 10, 0));

    let status = service.get_task_urgency_status(&task).await;

    assert_eq!(status.should_highlight, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settings_errors_surface_from_settings_queries() {
    let mut settings = MockSettingsRepository::new();
    settings.expect_find().returning(|_| {
        Err(SettingsRepositoryError::persistence(std::io::Error::other(
            "connection refused",
        )))
    });
    let service = ReviewQueueService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryReviewLogRepository::new()),
        Arc::new(settings),
        Arc::new(FixedClock::new(at(10, 10, 0))),
    );

    let result = service.should_show_daily_review(UserId::new()).await;

    assert!(matches!(result, Err(ReviewQueueError::Settings(_))));
}
