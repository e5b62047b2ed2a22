//! In-memory review settings store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::review::{
    domain::ReviewSettings,
    ports::{SettingsRepository, SettingsRepositoryError, SettingsRepositoryResult},
};
use crate::task::domain::UserId;

fn poisoned(err: impl std::fmt::Display) -> SettingsRepositoryError {
    SettingsRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory settings store keyed by owner.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsRepository {
    settings: Arc<RwLock<HashMap<UserId, ReviewSettings>>>,
}

impl InMemorySettingsRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn find(&self, owner_id: UserId) -> SettingsRepositoryResult<Option<ReviewSettings>> {
        let settings = self.settings.read().map_err(poisoned)?;
        Ok(settings.get(&owner_id).copied())
    }

    async fn save(&self, settings: &ReviewSettings) -> SettingsRepositoryResult<()> {
        let mut stored = self.settings.write().map_err(poisoned)?;
        stored.insert(settings.owner_id, *settings);
        Ok(())
    }
}
