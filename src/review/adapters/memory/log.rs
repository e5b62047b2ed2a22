//! In-memory append-only review log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::review::{
    domain::ReviewLog,
    ports::{ReviewLogRepository, ReviewLogRepositoryError, ReviewLogRepositoryResult},
};
use crate::task::domain::{TaskId, UserId};

/// Thread-safe in-memory review log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewLogRepository {
    entries: Arc<RwLock<Vec<ReviewLog>>>,
}

impl InMemoryReviewLogRepository {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ReviewLogRepositoryResult<std::sync::RwLockReadGuard<'_, Vec<ReviewLog>>> {
        self.entries.read().map_err(|err| {
            ReviewLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ReviewLogRepository for InMemoryReviewLogRepository {
    async fn append(&self, entry: &ReviewLog) -> ReviewLogRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            ReviewLogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(ReviewLogRepositoryError::DuplicateEntry(entry.id()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn find_by_task(&self, task_id: TaskId) -> ReviewLogRepositoryResult<Vec<ReviewLog>> {
        let entries = self.read()?;
        let mut history: Vec<ReviewLog> = entries
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        history.sort_by_key(ReviewLog::reviewed_at);
        Ok(history)
    }

    async fn exists_since(
        &self,
        owner_id: UserId,
        since: DateTime<Utc>,
    ) -> ReviewLogRepositoryResult<bool> {
        let entries = self.read()?;
        Ok(entries
            .iter()
            .any(|entry| entry.owner_id() == owner_id && entry.reviewed_at() >= since))
    }
}
