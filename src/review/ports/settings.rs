//! Repository port for per-user review settings.

use crate::review::domain::ReviewSettings;
use crate::task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for settings repository operations.
pub type SettingsRepositoryResult<T> = Result<T, SettingsRepositoryError>;

/// Settings persistence contract. One row per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the owner's settings, or `None` when never saved.
    async fn find(&self, owner_id: UserId) -> SettingsRepositoryResult<Option<ReviewSettings>>;

    /// Inserts or replaces the owner's settings.
    async fn save(&self, settings: &ReviewSettings) -> SettingsRepositoryResult<()>;
}

/// Errors returned by settings repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SettingsRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingsRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
