//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fastcheck::{
    clock::FixedClock,
    review::{
        adapters::memory::{
            InMemoryNotifier, InMemoryReviewLogRepository, InMemorySettingsRepository,
        },
        services::{ReviewDecisionService, ReviewNotificationService, ReviewQueueService},
    },
    schedule::TimeWindow,
    task::{
        adapters::memory::{
            InMemoryExecutorRepository, InMemoryProjectRepository, InMemoryTaskRepository,
        },
        domain::{NewProject, NewTask, Project, ProjectId, TaskId, UserId},
        services::{ProjectCatalogService, TaskLifecycleService, TaskStatusService},
    },
    worker::StatusRefresher,
};
use rstest::fixture;

/// Lifecycle service over in-memory adapters.
pub type Lifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryExecutorRepository,
    FixedClock,
>;

/// Catalog service over in-memory adapters.
pub type Catalog = ProjectCatalogService<
    InMemoryProjectRepository,
    InMemoryExecutorRepository,
    InMemoryTaskRepository,
    FixedClock,
>;

/// Review decision service over in-memory adapters.
pub type Decisions = ReviewDecisionService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryReviewLogRepository,
    FixedClock,
>;

/// Review queue service over in-memory adapters.
pub type Queue = ReviewQueueService<
    InMemoryTaskRepository,
    InMemoryReviewLogRepository,
    InMemorySettingsRepository,
    FixedClock,
>;

/// Status refresher over in-memory adapters.
pub type Refresher = StatusRefresher<
    InMemoryTaskRepository,
    FixedClock,
    InMemorySettingsRepository,
    InMemoryNotifier,
>;

/// Every service wired to one set of in-memory stores and one clock.
pub struct Tracker {
    pub lifecycle: Lifecycle,
    pub catalog: Catalog,
    pub decisions: Decisions,
    pub queue: Queue,
    pub refresher: Refresher,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub notifier: Arc<InMemoryNotifier>,
    pub clock: Arc<FixedClock>,
    pub owner_id: UserId,
}

/// Returns 2025-03-`day` at `hour`:00 UTC.
///
/// # Panics
///
/// Panics when the date is not valid.
#[must_use]
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a window from `start` to `end`.
///
/// # Panics
///
/// Panics when `end` is not after `start`.
#[must_use]
pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(start, end).expect("valid window")
}

/// Provides a tracker whose clock starts on 2025-03-01 at 08:00 UTC.
#[fixture]
pub fn tracker() -> Tracker {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let executors = Arc::new(InMemoryExecutorRepository::new());
    let logs = Arc::new(InMemoryReviewLogRepository::new());
    let settings = Arc::new(InMemorySettingsRepository::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let clock = Arc::new(FixedClock::new(at(1, 8)));

    Tracker {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&projects),
            Arc::clone(&executors),
            Arc::clone(&clock),
        ),
        catalog: ProjectCatalogService::new(
            Arc::clone(&projects),
            executors,
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        decisions: ReviewDecisionService::new(
            Arc::clone(&tasks),
            projects,
            Arc::clone(&logs),
            Arc::clone(&clock),
        ),
        queue: ReviewQueueService::new(
            Arc::clone(&tasks),
            logs,
            Arc::clone(&settings),
            Arc::clone(&clock),
        ),
        refresher: StatusRefresher::new(
            TaskStatusService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            ReviewNotificationService::new(settings, Arc::clone(&notifier)),
            std::time::Duration::from_secs(60),
        ),
        tasks,
        notifier,
        clock,
        owner_id: UserId::new(),
    }
}

impl Tracker {
    /// Creates a project spanning the first twenty days of March.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog rejects the project.
    pub async fn project(&self, name: &str) -> eyre::Result<Project> {
        Ok(self
            .catalog
            .create_project(NewProject {
                owner_id: self.owner_id,
                name: name.to_owned(),
                description: None,
                color_icon: None,
                window: window(at(1, 0), at(20, 0)),
            })
            .await?)
    }

    /// Creates a task in `project_id` and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the lifecycle service rejects the task.
    pub async fn task(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
        title: &str,
        task_window: TimeWindow,
    ) -> eyre::Result<TaskId> {
        let placement = self
            .lifecycle
            .create_task(NewTask {
                owner_id: self.owner_id,
                project_id,
                parent_id,
                executor_id: None,
                title: title.to_owned(),
                description: None,
                window: task_window,
                is_urgent: false,
            })
            .await?;
        Ok(placement.task.id())
    }
}
