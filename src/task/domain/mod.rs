//! Domain model for tasks, projects and executors.
//!
//! The task domain models project membership, one level of subtask nesting,
//! time-derived status and review resolution while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod project;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ExecutorId, ProjectId, TaskId, UserId};
pub use project::{Executor, NewProject, PersistedProjectData, Project};
pub use status::{StatusChange, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
