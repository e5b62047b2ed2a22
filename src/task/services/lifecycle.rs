//! Service layer for task creation, editing, removal and calendar queries.

use crate::config::{CalendarConfig, TrackerConfig};
use crate::schedule::{
    BusyInterval, ConstraintContext, OverlapWarning, ScheduleError, TaskConstraints, TimeWindow,
    calculate_constraints, calendar, find_available_time_slots, validate_placement,
};
use crate::task::{
    domain::{ExecutorId, NewTask, ProjectId, Task, TaskDomainError, TaskId, UserId},
    ports::{
        CatalogRepositoryError, ExecutorRepository, ProjectRepository, TaskRepository,
        TaskRepositoryError,
    },
};
use chrono::{NaiveDate, TimeDelta};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Edits applied to an existing task. Unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<Option<String>>,
    executor_id: Option<Option<ExecutorId>>,
    is_urgent: Option<bool>,
    window: Option<TimeWindow>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit for `task_id`.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            executor_id: None,
            is_urgent: None,
            window: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Assigns or clears the executor.
    #[must_use]
    pub const fn with_executor(mut self, executor_id: Option<ExecutorId>) -> Self {
        self.executor_id = Some(executor_id);
        self
    }

    /// Sets the urgency flag.
    #[must_use]
    pub const fn with_urgency(mut self, is_urgent: bool) -> Self {
        self.is_urgent = Some(is_urgent);
        self
    }

    /// Moves the task to a new window.
    #[must_use]
    pub const fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// Stored task together with any advisory overlap notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlacement {
    /// Task as persisted.
    pub task: Task,
    /// Siblings overlapping the task window, if any.
    pub overlap_warning: Option<OverlapWarning>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Date placement is invalid.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// The project does not exist or belongs to another user.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The parent task does not exist or belongs to another user.
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),
    /// The parent is itself a subtask.
    #[error("task {parent_id} is a subtask and cannot have subtasks")]
    NestingTooDeep {
        /// Rejected parent.
        parent_id: TaskId,
    },
    /// The parent task lives in another project.
    #[error("parent task {parent_id} does not belong to project {project_id}")]
    ParentInOtherProject {
        /// Rejected parent.
        parent_id: TaskId,
        /// Requested project.
        project_id: ProjectId,
    },
    /// The executor does not exist or belongs to another user.
    #[error("executor not found: {0}")]
    ExecutorNotFound(ExecutorId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project or executor repository operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, E, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    E: ExecutorRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    executors: Arc<E>,
    clock: Arc<C>,
    calendar: CalendarConfig,
    min_slot: TimeDelta,
}

impl<T, P, E, C> TaskLifecycleService<T, P, E, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    E: ExecutorRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with default calendar and slot settings.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, executors: Arc<E>, clock: Arc<C>) -> Self {
        let defaults = TrackerConfig::default();
        Self {
            tasks,
            projects,
            executors,
            clock,
            calendar: defaults.calendar,
            min_slot: defaults.min_slot,
        }
    }

    /// Applies calendar and slot settings from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.calendar = config.calendar;
        self.min_slot = config.min_slot;
        self
    }

    /// Creates a task or subtask.
    ///
    /// The window must lie inside the project window for tasks and inside
    /// the parent window for subtasks. Overlapping siblings is reported, not
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails or a repository
    /// rejects the operation.
    pub async fn create_task(&self, request: NewTask) -> TaskLifecycleResult<TaskPlacement> {
        let owner_id = request.owner_id;
        let project_id = request.project_id;
        let parent_id = request.parent_id;
        if let Some(executor_id) = request.executor_id {
            self.require_executor(owner_id, executor_id).await?;
        }

        let task = Task::new(request, &*self.clock)?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .filter(|found| found.owner_id() == owner_id)
            .ok_or(TaskLifecycleError::ProjectNotFound(project_id))?;
        let bounds = match parent_id {
            Some(parent) => *self.require_parent(owner_id, project_id, parent).await?.window(),
            None => *project.window(),
        };

        let siblings = self.busy_intervals(project_id, parent_id).await?;
        let overlap_warning = validate_placement(task.window(), Some(&bounds), &siblings, None)?;
        self.tasks.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %project_id,
            status = %task.status(),
            overlaps = overlap_warning.is_some(),
            "task created"
        );
        Ok(TaskPlacement {
            task,
            overlap_warning,
        })
    }

    /// Edits an existing task.
    ///
    /// A window change is validated like creation, must still contain the
    /// task's subtasks and re-derives a non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task is missing, validation
    /// fails or a repository rejects the operation.
    pub async fn update_task(
        &self,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskPlacement> {
        let mut task = self.require_task(request.task_id).await?;
        let clock = &*self.clock;

        if let Some(title) = request.title {
            task.rename(&title, clock)?;
        }
        if let Some(description) = request.description {
            task.describe(description, clock);
        }
        if let Some(executor_id) = request.executor_id {
            if let Some(executor) = executor_id {
                self.require_executor(task.owner_id(), executor).await?;
            }
            task.assign_executor(executor_id, clock);
        }
        if let Some(is_urgent) = request.is_urgent {
            task.set_urgent(is_urgent, clock);
        }

        let mut overlap_warning = None;
        if let Some(window) = request.window {
            overlap_warning = self.check_reschedule(&task, &window).await?;
            task.reschedule(window, clock);
        }

        self.tasks.update(&task).await?;
        tracing::debug!(task_id = %task.id(), status = %task.status(), "task updated");
        Ok(TaskPlacement {
            task,
            overlap_warning,
        })
    }

    /// Deletes a task together with its subtasks.
    ///
    /// Returns how many tasks were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not exist
    /// or persistence fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<usize> {
        let removed = self.tasks.delete(task_id).await?;
        tracing::info!(task_id = %task_id, removed, "task deleted");
        Ok(removed)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Returns the owner's tasks intersecting the local day `date`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_day(
        &self,
        owner_id: UserId,
        date: NaiveDate,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let window = calendar::day_window(date, self.calendar.utc_offset);
        Ok(self.tasks.find_in_window(owner_id, window).await?)
    }

    /// Returns the owner's tasks intersecting the week containing `date`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_week(
        &self,
        owner_id: UserId,
        date: NaiveDate,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let window = calendar::week_window(date, &self.calendar);
        Ok(self.tasks.find_in_window(owner_id, window).await?)
    }

    /// Returns the owner's tasks intersecting the month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_month(
        &self,
        owner_id: UserId,
        date: NaiveDate,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let window = calendar::month_window(date, &self.calendar);
        Ok(self.tasks.find_in_window(owner_id, window).await?)
    }

    /// Computes date picker bounds for a task form (`parent_id` unset) or a
    /// subtask form.
    ///
    /// `exclude_id` names the task being edited so it does not block itself.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the project or parent is missing.
    pub async fn constraints_for(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
        exclude_id: Option<TaskId>,
    ) -> TaskLifecycleResult<TaskConstraints> {
        let (bounds, siblings) = self.placement_context(project_id, parent_id).await?;
        let context = if parent_id.is_some() {
            ConstraintContext::Subtask
        } else {
            ConstraintContext::Task
        };
        Ok(calculate_constraints(
            context,
            Some(&bounds),
            &siblings,
            exclude_id,
        ))
    }

    /// Suggests free windows of at least the configured minimum length.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the project or parent is missing.
    pub async fn suggest_slots(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
        exclude_id: Option<TaskId>,
    ) -> TaskLifecycleResult<Vec<TimeWindow>> {
        let (bounds, siblings) = self.placement_context(project_id, parent_id).await?;
        Ok(find_available_time_slots(
            &bounds,
            &siblings,
            self.min_slot,
            exclude_id,
        ))
    }

    async fn check_reschedule(
        &self,
        task: &Task,
        window: &TimeWindow,
    ) -> TaskLifecycleResult<Option<OverlapWarning>> {
        let (bounds, siblings) = self
            .placement_context(task.project_id(), task.parent_id())
            .await?;
        let warning = validate_placement(window, Some(&bounds), &siblings, Some(task.id()))?;

        if !task.is_subtask() {
            let subtasks = self
                .tasks
                .find_siblings(task.project_id(), Some(task.id()))
                .await?;
            if let Some(outside) = subtasks
                .iter()
                .find(|subtask| !window.contains_window(subtask.window()))
            {
                return Err(ScheduleError::OutsideParent {
                    window: *outside.window(),
                    parent: *window,
                }
                .into());
            }
        }
        Ok(warning)
    }

    async fn placement_context(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
    ) -> TaskLifecycleResult<(TimeWindow, Vec<BusyInterval>)> {
        let bounds = match parent_id {
            Some(parent) => {
                let parent_task = self
                    .tasks
                    .find_by_id(parent)
                    .await?
                    .ok_or(TaskLifecycleError::ParentNotFound(parent))?;
                *parent_task.window()
            }
            None => *self
                .projects
                .find_by_id(project_id)
                .await?
                .ok_or(TaskLifecycleError::ProjectNotFound(project_id))?
                .window(),
        };
        let siblings = self.busy_intervals(project_id, parent_id).await?;
        Ok((bounds, siblings))
    }

    async fn busy_intervals(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
    ) -> TaskLifecycleResult<Vec<BusyInterval>> {
        let siblings = self.tasks.find_siblings(project_id, parent_id).await?;
        Ok(siblings
            .iter()
            .map(|sibling| BusyInterval::new(sibling.id(), *sibling.window()))
            .collect())
    }

    async fn require_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn require_parent(
        &self,
        owner_id: UserId,
        project_id: ProjectId,
        parent_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let parent = self
            .tasks
            .find_by_id(parent_id)
            .await?
            .filter(|found| found.owner_id() == owner_id)
            .ok_or(TaskLifecycleError::ParentNotFound(parent_id))?;
        if parent.is_subtask() {
            return Err(TaskLifecycleError::NestingTooDeep { parent_id });
        }
        if parent.project_id() != project_id {
            return Err(TaskLifecycleError::ParentInOtherProject {
                parent_id,
                project_id,
            });
        }
        Ok(parent)
    }

    async fn require_executor(
        &self,
        owner_id: UserId,
        executor_id: ExecutorId,
    ) -> TaskLifecycleResult<()> {
        self.executors
            .find_by_id(executor_id)
            .await?
            .filter(|found| found.owner_id() == owner_id)
            .map(|_| ())
            .ok_or(TaskLifecycleError::ExecutorNotFound(executor_id))
    }
}
