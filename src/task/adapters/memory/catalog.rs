//! In-memory repositories for projects and executors.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Executor, ExecutorId, Project, ProjectId, UserId},
    ports::{
        CatalogRepositoryError, CatalogRepositoryResult, ExecutorRepository, ProjectRepository,
    },
};

fn poisoned(err: impl std::fmt::Display) -> CatalogRepositoryError {
    CatalogRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> CatalogRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        if projects.contains_key(&project.id()) {
            return Err(CatalogRepositoryError::DuplicateProject(project.id()));
        }
        projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> CatalogRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        let slot = projects
            .get_mut(&project.id())
            .ok_or(CatalogRepositoryError::ProjectNotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> CatalogRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        projects
            .remove(&id)
            .map(|_| ())
            .ok_or(CatalogRepositoryError::ProjectNotFound(id))
    }

    async fn find_by_id(&self, id: ProjectId) -> CatalogRepositoryResult<Option<Project>> {
        let projects = self.projects.read().map_err(poisoned)?;
        Ok(projects.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> CatalogRepositoryResult<Vec<Project>> {
        let projects = self.projects.read().map_err(poisoned)?;
        let mut owned: Vec<Project> = projects
            .values()
            .filter(|project| project.owner_id() == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|project| project.window().start());
        Ok(owned)
    }
}

/// Thread-safe in-memory executor repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutorRepository {
    executors: Arc<RwLock<HashMap<ExecutorId, Executor>>>,
}

impl InMemoryExecutorRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExecutorRepository for InMemoryExecutorRepository {
    async fn store(&self, executor: &Executor) -> CatalogRepositoryResult<()> {
        let mut executors = self.executors.write().map_err(poisoned)?;
        if executors.contains_key(&executor.id()) {
            return Err(CatalogRepositoryError::DuplicateExecutor(executor.id()));
        }
        executors.insert(executor.id(), executor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ExecutorId) -> CatalogRepositoryResult<Option<Executor>> {
        let executors = self.executors.read().map_err(poisoned)?;
        Ok(executors.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> CatalogRepositoryResult<Vec<Executor>> {
        let executors = self.executors.read().map_err(poisoned)?;
        let mut owned: Vec<Executor> = executors
            .values()
            .filter(|executor| executor.owner_id() == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(owned)
    }
}
