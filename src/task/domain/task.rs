//! Task aggregate root.

use super::{ExecutorId, ProjectId, StatusChange, TaskDomainError, TaskId, TaskStatus, UserId};
use crate::review::domain::ReviewDecision;
use crate::schedule::TimeWindow;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task belongs to a project and, when `parent_id` is set, is a subtask of
/// another task in the same project. Its window runs from start date to due
/// date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: UserId,
    project_id: ProjectId,
    parent_id: Option<TaskId>,
    executor_id: Option<ExecutorId>,
    title: String,
    description: Option<String>,
    window: TimeWindow,
    is_urgent: bool,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning user.
    pub owner_id: UserId,
    /// Containing project.
    pub project_id: ProjectId,
    /// Parent task for subtasks.
    pub parent_id: Option<TaskId>,
    /// Assigned executor label.
    pub executor_id: Option<ExecutorId>,
    /// Title; trimmed and required.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Start and due dates.
    pub window: TimeWindow,
    /// Whether overdue escalation is hourly.
    pub is_urgent: bool,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted parent task, if any.
    pub parent_id: Option<TaskId>,
    /// Persisted executor, if any.
    pub executor_id: Option<ExecutorId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted start and due dates.
    pub window: TimeWindow,
    /// Persisted urgency flag.
    pub is_urgent: bool,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task whose initial status is derived from the clock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(data: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = normalize_title(&data.title)?;
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            owner_id: data.owner_id,
            project_id: data.project_id,
            parent_id: data.parent_id,
            executor_id: data.executor_id,
            title,
            description: normalize_description(data.description),
            window: data.window,
            is_urgent: data.is_urgent,
            status: TaskStatus::derive(timestamp, &data.window, TaskStatus::Waiting),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            project_id: data.project_id,
            parent_id: data.parent_id,
            executor_id: data.executor_id,
            title: data.title,
            description: data.description,
            window: data.window,
            is_urgent: data.is_urgent,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the containing project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the parent task for subtasks.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns `true` when the task is nested under another task.
    #[must_use]
    pub const fn is_subtask(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Returns the assigned executor, if any.
    #[must_use]
    pub const fn executor_id(&self) -> Option<ExecutorId> {
        self.executor_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start/due window.
    #[must_use]
    pub const fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.window.start()
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.window.end()
    }

    /// Returns `true` for urgent tasks.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    /// Returns the stored status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Recomputes the status from the clock.
    ///
    /// Returns the change when the status moved, or `None` when the stored
    /// status is already current.
    pub fn refresh_status(&mut self, clock: &impl Clock) -> Option<StatusChange> {
        let now = clock.utc();
        let next = TaskStatus::derive(now, &self.window, self.status);
        if next == self.status {
            return None;
        }
        let change = StatusChange {
            from: self.status,
            to: next,
        };
        self.status = next;
        self.updated_at = now;
        Some(change)
    }

    /// Applies a review decision.
    ///
    /// Completing or cancelling makes the status terminal. Extending moves
    /// the due date and re-derives the status from the new window, so an
    /// extended task rests in `waiting` or `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyResolved`] for terminal tasks,
    /// [`TaskDomainError::ExtensionNotInFuture`] when the new due date is not
    /// after the current time, or [`TaskDomainError::Schedule`] when it is not
    /// after the start date.
    pub fn apply_review(
        &mut self,
        decision: &ReviewDecision,
        clock: &impl Clock,
    ) -> Result<StatusChange, TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::AlreadyResolved {
                task_id: self.id,
                status: self.status,
            });
        }

        let now = clock.utc();
        let from = self.status;
        match *decision {
            ReviewDecision::Completed => self.status = TaskStatus::Completed,
            ReviewDecision::Cancelled => self.status = TaskStatus::Cancelled,
            ReviewDecision::Extended { new_due_date } => {
                if new_due_date <= now {
                    return Err(TaskDomainError::ExtensionNotInFuture {
                        task_id: self.id,
                        due_date: new_due_date,
                    });
                }
                let extended = self.window.with_end(new_due_date)?;
                self.window = extended;
                self.status = TaskStatus::derive(now, &extended, from);
            }
        }
        self.updated_at = now;
        Ok(StatusChange {
            from,
            to: self.status,
        })
    }

    /// Moves the task to a new window, re-deriving a non-terminal status.
    pub fn reschedule(&mut self, window: TimeWindow, clock: &impl Clock) {
        let now = clock.utc();
        self.window = window;
        self.status = TaskStatus::derive(now, &window, self.status);
        self.updated_at = now;
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn rename(&mut self, title: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.title = normalize_title(title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description; blank descriptions are cleared.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = normalize_description(description);
        self.touch(clock);
    }

    /// Assigns or clears the executor.
    pub fn assign_executor(&mut self, executor_id: Option<ExecutorId>, clock: &impl Clock) {
        self.executor_id = executor_id;
        self.touch(clock);
    }

    /// Sets the urgency flag.
    pub fn set_urgent(&mut self, is_urgent: bool, clock: &impl Clock) {
        self.is_urgent = is_urgent;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
