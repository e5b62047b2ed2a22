//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::schedule::TimeWindow;
use crate::task::{
    domain::{ProjectId, Task, TaskId, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn select(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.read()?;
        let mut selected: Vec<Task> = tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        selected.sort_by_key(|task| (task.start_date(), task.id()));
        Ok(selected)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<usize> {
        let mut tasks = self.write()?;
        if tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        let before = tasks.len();
        tasks.retain(|_, task| task.parent_id() != Some(id));
        Ok(before - tasks.len() + 1)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_siblings(
        &self,
        project_id: ProjectId,
        parent_id: Option<TaskId>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.project_id() == project_id && task.parent_id() == parent_id)
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.project_id() == project_id)
    }

    async fn find_in_window(
        &self,
        owner_id: UserId,
        window: TimeWindow,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.owner_id() == owner_id && task.window().overlaps(&window))
    }

    async fn find_active_by_owner(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.owner_id() == owner_id && !task.status().is_terminal())
    }

    async fn find_active(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| !task.status().is_terminal())
    }
}
