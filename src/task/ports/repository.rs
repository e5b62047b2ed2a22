//! Repository port for task persistence and lookup.

use crate::schedule::TimeWindow;
use crate::task::domain::{ProjectId, Task, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task and its subtasks, returning how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<usize>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns tasks sharing a project and parent, i.e. the siblings of a
    /// task placed there. `parent_id` of `None` selects top-level tasks.
    async fn find_siblings(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks in a project, subtasks included.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the owner's tasks whose window overlaps `window`.
    async fn find_in_window(
        &self,
        owner_id: UserId,
        window: TimeWindow,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the owner's tasks that are not completed or cancelled.
    async fn find_active_by_owner(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task that is not completed or cancelled.
    async fn find_active(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
