//! Repository ports for projects and executor labels.

use crate::task::domain::{Executor, ExecutorId, Project, ProjectId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog repository operations.
pub type CatalogRepositoryResult<T> = Result<T, CatalogRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::DuplicateProject`] when the ID exists.
    async fn store(&self, project: &Project) -> CatalogRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn update(&self, project: &Project) -> CatalogRepositoryResult<()>;

    /// Deletes a project.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn delete(&self, id: ProjectId) -> CatalogRepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> CatalogRepositoryResult<Option<Project>>;

    /// Lists the owner's projects ordered by start date.
    async fn find_by_owner(&self, owner_id: UserId) -> CatalogRepositoryResult<Vec<Project>>;
}

/// Executor persistence contract.
#[async_trait]
pub trait ExecutorRepository: Send + Sync {
    /// Stores a new executor.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogRepositoryError::DuplicateExecutor`] when the ID
    /// exists.
    async fn store(&self, executor: &Executor) -> CatalogRepositoryResult<()>;

    /// Finds an executor by identifier.
    async fn find_by_id(&self, id: ExecutorId) -> CatalogRepositoryResult<Option<Executor>>;

    /// Lists the owner's executors ordered by name.
    async fn find_by_owner(&self, owner_id: UserId) -> CatalogRepositoryResult<Vec<Executor>>;
}

/// Errors returned by project and executor repositories.
#[derive(Debug, Clone, Error)]
pub enum CatalogRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// An executor with the same identifier already exists.
    #[error("duplicate executor identifier: {0}")]
    DuplicateExecutor(ExecutorId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
