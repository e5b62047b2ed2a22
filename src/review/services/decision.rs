//! Service applying review decisions to tasks.

use crate::review::{
    domain::{ReviewDecision, ReviewLog},
    ports::{ReviewLogRepository, ReviewLogRepositoryError},
};
use crate::schedule::{ScheduleError, TimeWindow};
use crate::task::{
    domain::{ProjectId, StatusChange, Task, TaskDomainError, TaskId},
    ports::{CatalogRepositoryError, ProjectRepository, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Review action requested by the task owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTaskRequest {
    /// Task under review.
    pub task_id: TaskId,
    /// Decision taken.
    pub decision: ReviewDecision,
    /// Optional reviewer note.
    pub note: Option<String>,
}

impl ReviewTaskRequest {
    /// Creates a request without a note.
    #[must_use]
    pub const fn new(task_id: TaskId, decision: ReviewDecision) -> Self {
        Self {
            task_id,
            decision,
            note: None,
        }
    }

    /// Attaches a reviewer note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Result of a successful review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewedTask {
    /// Task as persisted after the review.
    pub task: Task,
    /// Appended log entry.
    pub log: ReviewLog,
    /// Status before and after the review.
    pub change: StatusChange,
}

/// Service-level errors for review decisions.
#[derive(Debug, Error)]
pub enum ReviewDecisionError {
    /// The decision is not valid for the task.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The extended window leaves its parent bounds.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The task's project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
    /// Review log operation failed.
    #[error(transparent)]
    Log(#[from] ReviewLogRepositoryError),
}

/// Result type for review decision operations.
pub type ReviewDecisionResult<T> = Result<T, ReviewDecisionError>;

/// Applies review decisions and records them in the review log.
#[derive(Clone)]
pub struct ReviewDecisionService<T, P, L, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    L: ReviewLogRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    logs: Arc<L>,
    clock: Arc<C>,
}

impl<T, P, L, C> ReviewDecisionService<T, P, L, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    L: ReviewLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new review decision service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, logs: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            logs,
            clock,
        }
    }

    /// Reviews a task.
    ///
    /// The decision is validated first. The log entry is appended before the
    /// task is written; the two writes are not transactional.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDecisionError`] when the task is missing or already
    /// resolved, when an extension is not in the future, leaves the parent
    /// bounds or would leave a subtask outside the task, or when persistence
    /// fails.
    pub async fn review_task(
        &self,
        request: ReviewTaskRequest,
    ) -> ReviewDecisionResult<ReviewedTask> {
        let ReviewTaskRequest {
            task_id,
            decision,
            note,
        } = request;
        let original = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ReviewDecisionError::TaskNotFound(task_id))?;

        let mut task = original.clone();
        let change = task.apply_review(&decision, &*self.clock)?;
        if decision.new_due_date().is_some() {
            self.check_extension(&task).await?;
        }

        let log = ReviewLog::record(&original, &decision, note, &*self.clock);
        self.logs.append(&log).await?;
        self.tasks.update(&task).await?;
        tracing::info!(
            task_id = %task_id,
            outcome = %decision.outcome(),
            from = %change.from,
            to = %change.to,
            "task reviewed"
        );
        Ok(ReviewedTask { task, log, change })
    }

    /// Extended windows must stay inside their parent bounds and keep every
    /// subtask inside them.
    async fn check_extension(&self, task: &Task) -> ReviewDecisionResult<()> {
        let bounds = self.parent_bounds(task).await?;
        if !bounds.contains_window(task.window()) {
            return Err(ScheduleError::OutsideParent {
                window: *task.window(),
                parent: bounds,
            }
            .into());
        }
        if task.is_subtask() {
            return Ok(());
        }

        let subtasks = self
            .tasks
            .find_siblings(task.project_id(), Some(task.id()))
            .await?;
        if let Some(outside) = subtasks
            .iter()
            .find(|subtask| !task.window().contains_window(subtask.window()))
        {
            return Err(ScheduleError::OutsideParent {
                window: *outside.window(),
                parent: *task.window(),
            }
            .into());
        }
        Ok(())
    }

    async fn parent_bounds(&self, task: &Task) -> ReviewDecisionResult<TimeWindow> {
        if let Some(parent_id) = task.parent_id() {
            let parent = self
                .tasks
                .find_by_id(parent_id)
                .await?
                .ok_or(ReviewDecisionError::TaskNotFound(parent_id))?;
            return Ok(*parent.window());
        }
        let project = self
            .projects
            .find_by_id(task.project_id())
            .await?
            .ok_or(ReviewDecisionError::ProjectNotFound(task.project_id()))?;
        Ok(*project.window())
    }
}
