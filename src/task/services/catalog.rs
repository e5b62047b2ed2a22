//! Service layer for projects and executor labels.

use crate::schedule::{ScheduleError, TimeWindow};
use crate::task::{
    domain::{Executor, NewProject, Project, ProjectId, TaskDomainError, UserId},
    ports::{
        CatalogRepositoryError, ExecutorRepository, ProjectRepository, TaskRepository,
        TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Edits applied to an existing project. Unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    project_id: ProjectId,
    name: Option<String>,
    style: Option<(Option<String>, Option<String>)>,
    window: Option<TimeWindow>,
}

impl UpdateProjectRequest {
    /// Creates an empty edit for `project_id`.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            name: None,
            style: None,
            window: None,
        }
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces description and color/icon token together.
    #[must_use]
    pub fn with_style(mut self, description: Option<String>, color_icon: Option<String>) -> Self {
        self.style = Some((description, color_icon));
        self
    }

    /// Moves the project window.
    #[must_use]
    pub const fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// Service-level errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The new project window would leave tasks outside it.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The project still contains tasks.
    #[error("project {project_id} still contains {task_count} tasks")]
    ProjectHasTasks {
        /// Project that was kept.
        project_id: ProjectId,
        /// Number of tasks in the project.
        task_count: usize,
    },
    /// Project or executor repository operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for catalog service operations.
pub type CatalogServiceResult<T> = Result<T, CatalogServiceError>;

/// Project and executor management service.
#[derive(Clone)]
pub struct ProjectCatalogService<P, E, T, C>
where
    P: ProjectRepository,
    E: ExecutorRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    executors: Arc<E>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, E, T, C> ProjectCatalogService<P, E, T, C>
where
    P: ProjectRepository,
    E: ExecutorRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(projects: Arc<P>, executors: Arc<E>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            executors,
            tasks,
            clock,
        }
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError`] when the name is blank or persistence
    /// fails.
    pub async fn create_project(&self, request: NewProject) -> CatalogServiceResult<Project> {
        let project = Project::new(request, &*self.clock)?;
        self.projects.store(&project).await?;
        tracing::info!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Edits a project.
    ///
    /// A new window must still contain every top-level task of the project.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError`] when the project is missing,
    /// validation fails or persistence fails.
    pub async fn update_project(
        &self,
        request: UpdateProjectRequest,
    ) -> CatalogServiceResult<Project> {
        let mut project = self
            .projects
            .find_by_id(request.project_id)
            .await?
            .ok_or(CatalogServiceError::ProjectNotFound(request.project_id))?;
        let clock = &*self.clock;

        if let Some(name) = request.name {
            project.rename(&name, clock)?;
        }
        if let Some((description, color_icon)) = request.style {
            project.restyle(description, color_icon, clock);
        }
        if let Some(window) = request.window {
            let top_level = self.tasks.find_siblings(project.id(), None).await?;
            if let Some(outside) = top_level
                .iter()
                .find(|task| !window.contains_window(task.window()))
            {
                return Err(ScheduleError::OutsideParent {
                    window: *outside.window(),
                    parent: window,
                }
                .into());
            }
            project.reschedule(window, clock);
        }

        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Lists the owner's projects ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Catalog`] when persistence fails.
    pub async fn list_projects(&self, owner_id: UserId) -> CatalogServiceResult<Vec<Project>> {
        Ok(self.projects.find_by_owner(owner_id).await?)
    }

    /// Deletes an empty project.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::ProjectHasTasks`] while the project
    /// contains tasks, or a repository error.
    pub async fn delete_project(&self, project_id: ProjectId) -> CatalogServiceResult<()> {
        let task_count = self.tasks.find_by_project(project_id).await?.len();
        if task_count > 0 {
            return Err(CatalogServiceError::ProjectHasTasks {
                project_id,
                task_count,
            });
        }
        self.projects.delete(project_id).await?;
        tracing::info!(project_id = %project_id, "project deleted");
        Ok(())
    }

    /// Creates an executor label.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError`] when the name is blank or persistence
    /// fails.
    pub async fn create_executor(
        &self,
        owner_id: UserId,
        name: &str,
        color_icon: Option<String>,
    ) -> CatalogServiceResult<Executor> {
        let executor = Executor::new(owner_id, name, color_icon, &*self.clock)?;
        self.executors.store(&executor).await?;
        Ok(executor)
    }

    /// Lists the owner's executors ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Catalog`] when persistence fails.
    pub async fn list_executors(&self, owner_id: UserId) -> CatalogServiceResult<Vec<Executor>> {
        Ok(self.executors.find_by_owner(owner_id).await?)
    }
}
