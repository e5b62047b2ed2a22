//! Repository port for the append-only review log.

use crate::review::domain::{ReviewLog, ReviewLogId};
use crate::task::domain::{TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for review log repository operations.
pub type ReviewLogRepositoryResult<T> = Result<T, ReviewLogRepositoryError>;

/// Review log persistence contract.
#[async_trait]
pub trait ReviewLogRepository: Send + Sync {
    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewLogRepositoryError::DuplicateEntry`] when the entry ID
    /// already exists.
    async fn append(&self, entry: &ReviewLog) -> ReviewLogRepositoryResult<()>;

    /// Returns the review history of a task, oldest first.
    async fn find_by_task(&self, task_id: TaskId) -> ReviewLogRepositoryResult<Vec<ReviewLog>>;

    /// Returns `true` when the owner logged any review at or after `since`.
    async fn exists_since(
        &self,
        owner_id: UserId,
        since: DateTime<Utc>,
    ) -> ReviewLogRepositoryResult<bool>;
}

/// Errors returned by review log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewLogRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate review log entry: {0}")]
    DuplicateEntry(ReviewLogId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
