//! Batch recomputation of time-derived task statuses.

use crate::task::{
    domain::{StatusChange, Task, TaskId, TaskStatus, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// One persisted status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// Task that changed.
    pub task_id: TaskId,
    /// Owning user.
    pub owner_id: UserId,
    /// Task title at the time of the change.
    pub title: String,
    /// Task due date.
    pub due_date: DateTime<Utc>,
    /// Whether the task is urgent.
    pub is_urgent: bool,
    /// Status before and after.
    pub change: StatusChange,
}

impl StatusTransition {
    fn of(task: &Task, change: StatusChange) -> Self {
        Self {
            task_id: task.id(),
            owner_id: task.owner_id(),
            title: task.title().to_owned(),
            due_date: task.due_date(),
            is_urgent: task.is_urgent(),
            change,
        }
    }

    /// Returns `true` when the task has just become due for review.
    #[must_use]
    pub fn entered_review(&self) -> bool {
        self.change.to == TaskStatus::PendingReview
    }
}

/// Outcome of a status refresh batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRefreshReport {
    /// Tasks loaded and recomputed.
    pub examined: usize,
    /// Changes that were persisted.
    pub transitions: Vec<StatusTransition>,
    /// Changes that could not be persisted.
    pub failures: usize,
}

/// Recomputes stored statuses against the clock.
#[derive(Clone)]
pub struct TaskStatusService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskStatusService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new status service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Refreshes the statuses of one owner's open tasks.
    ///
    /// Only tasks whose status changed are written. Each write stands alone:
    /// a failed write is logged and counted while the batch continues.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the tasks cannot be loaded.
    pub async fn update_task_statuses(
        &self,
        owner_id: UserId,
    ) -> Result<StatusRefreshReport, TaskRepositoryError> {
        let tasks = self.repository.find_active_by_owner(owner_id).await?;
        Ok(self.refresh(tasks).await)
    }

    /// Refreshes the statuses of every open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when the tasks cannot be loaded.
    pub async fn update_all_task_statuses(
        &self,
    ) -> Result<StatusRefreshReport, TaskRepositoryError> {
        let tasks = self.repository.find_active().await?;
        Ok(self.refresh(tasks).await)
    }

    async fn refresh(&self, tasks: Vec<Task>) -> StatusRefreshReport {
        let mut report = StatusRefreshReport {
            examined: tasks.len(),
            ..StatusRefreshReport::default()
        };

        for mut task in tasks {
            let Some(change) = task.refresh_status(&*self.clock) else {
                continue;
            };
            match self.repository.update(&task).await {
                Ok(()) => report.transitions.push(StatusTransition::of(&task, change)),
                Err(error) => {
                    report.failures += 1;
                    tracing::warn!(
                        task_id = %task.id(),
                        from = %change.from,
                        to = %change.to,
                        error = %error,
                        "failed to persist task status"
                    );
                }
            }
        }

        tracing::debug!(
            examined = report.examined,
            changed = report.transitions.len(),
            failures = report.failures,
            "task statuses refreshed"
        );
        report
    }
}
