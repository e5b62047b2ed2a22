//! Shared world state for task status BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fastcheck::{
    clock::FixedClock,
    review::{
        adapters::memory::{InMemoryReviewLogRepository, InMemorySettingsRepository},
        services::{
            ReviewDecisionError, ReviewDecisionService, ReviewQueueService, ReviewedTask,
        },
    },
    task::{
        adapters::memory::{
            InMemoryExecutorRepository, InMemoryProjectRepository, InMemoryTaskRepository,
        },
        domain::{Project, TaskId, UserId},
        services::{ProjectCatalogService, TaskLifecycleService, TaskStatusService},
    },
};
use rstest::fixture;

/// Scenario world for task status behaviour tests.
pub struct TaskStatusWorld {
    pub lifecycle: TaskLifecycleService<
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        InMemoryExecutorRepository,
        FixedClock,
    >,
    pub catalog: ProjectCatalogService<
        InMemoryProjectRepository,
        InMemoryExecutorRepository,
        InMemoryTaskRepository,
        FixedClock,
    >,
    pub statuses: TaskStatusService<InMemoryTaskRepository, FixedClock>,
    pub decisions: ReviewDecisionService<
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        InMemoryReviewLogRepository,
        FixedClock,
    >,
    pub queue: ReviewQueueService<
        InMemoryTaskRepository,
        InMemoryReviewLogRepository,
        InMemorySettingsRepository,
        FixedClock,
    >,
    pub logs: Arc<InMemoryReviewLogRepository>,
    pub clock: Arc<FixedClock>,
    pub owner_id: UserId,
    pub project: Option<Project>,
    pub task_id: Option<TaskId>,
    pub last_review: Option<Result<ReviewedTask, ReviewDecisionError>>,
}

impl TaskStatusWorld {
    /// Creates a world whose clock reads 2025-03-01 08:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let executors = Arc::new(InMemoryExecutorRepository::new());
        let logs = Arc::new(InMemoryReviewLogRepository::new());
        let clock = Arc::new(FixedClock::new(march(1, 8)));

        Self {
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
            statuses: TaskStatusService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            decisions: ReviewDecisionService::new(
                Arc::clone(&tasks),
                projects,
                Arc::clone(&logs),
                Arc::clone(&clock),
            ),
            queue: ReviewQueueService::new(
                tasks,
                Arc::clone(&logs),
                Arc::new(InMemorySettingsRepository::new()),
                Arc::clone(&clock),
            ),
            logs,
            clock,
            owner_id: UserId::new(),
            project: None,
            task_id: None,
            last_review: None,
        }
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskStatusWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStatusWorld {
    TaskStatusWorld::default()
}

/// Returns 2025-03-`day` at `hour`:00 UTC, or the epoch for invalid input.
#[must_use]
pub fn march(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
