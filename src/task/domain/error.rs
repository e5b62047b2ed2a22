//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::schedule::ScheduleError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The executor name is empty after trimming.
    #[error("executor name must not be empty")]
    EmptyExecutorName,

    /// The dates are invalid.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// The task has already been resolved by a review.
    #[error("task {task_id} is already {status}")]
    AlreadyResolved {
        /// Task identifier.
        task_id: TaskId,
        /// Terminal status.
        status: TaskStatus,
    },

    /// An extension must move the due date into the future.
    #[error("task {task_id} cannot be extended to {due_date}, which is not in the future")]
    ExtensionNotInFuture {
        /// Task identifier.
        task_id: TaskId,
        /// Requested due date.
        due_date: DateTime<Utc>,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
