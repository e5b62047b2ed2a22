//! Projects and executor labels.

use super::{ExecutorId, ProjectId, TaskDomainError, UserId};
use crate::schedule::TimeWindow;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project grouping tasks under a planned window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    owner_id: UserId,
    name: String,
    description: Option<String>,
    color_icon: Option<String>,
    window: TimeWindow,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Owning user.
    pub owner_id: UserId,
    /// Display name; trimmed and required.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Color/icon token used by calendar views.
    pub color_icon: Option<String>,
    /// Start date to planned finish.
    pub window: TimeWindow,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted color/icon token.
    pub color_icon: Option<String>,
    /// Persisted start date to planned finish.
    pub window: TimeWindow,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProjectName`] when the name is blank.
    pub fn new(data: NewProject, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let name = required(&data.name, TaskDomainError::EmptyProjectName)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            owner_id: data.owner_id,
            name,
            description: optional(data.description),
            color_icon: optional(data.color_icon),
            window: data.window,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            description: data.description,
            color_icon: data.color_icon,
            window: data.window,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the color/icon token, if any.
    #[must_use]
    pub fn color_icon(&self) -> Option<&str> {
        self.color_icon.as_deref()
    }

    /// Returns the start-to-planned-finish window.
    #[must_use]
    pub const fn window(&self) -> &TimeWindow {
        &self.window
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

    /// Replaces the name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyProjectName`] when the name is blank.
    pub fn rename(&mut self, name: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.name = required(name, TaskDomainError::EmptyProjectName)?;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Replaces description and color/icon token.
    pub fn restyle(
        &mut self,
        description: Option<String>,
        color_icon: Option<String>,
        clock: &impl Clock,
    ) {
        self.description = optional(description);
        self.color_icon = optional(color_icon);
        self.updated_at = clock.utc();
    }

    /// Moves the project window.
    ///
    /// Callers check that existing tasks still fit.
    pub fn reschedule(&mut self, window: TimeWindow, clock: &impl Clock) {
        self.window = window;
        self.updated_at = clock.utc();
    }
}

/// Executor label attachable to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executor {
    id: ExecutorId,
    owner_id: UserId,
    name: String,
    color_icon: Option<String>,
    created_at: DateTime<Utc>,
}

impl Executor {
    /// Creates an executor label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyExecutorName`] when the name is blank.
    pub fn new(
        owner_id: UserId,
        name: &str,
        color_icon: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            id: ExecutorId::new(),
            owner_id,
            name: required(name, TaskDomainError::EmptyExecutorName)?,
            color_icon: optional(color_icon),
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an executor from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ExecutorId,
        owner_id: UserId,
        name: String,
        color_icon: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            color_icon,
            created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ExecutorId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the color/icon token, if any.
    #[must_use]
    pub fn color_icon(&self) -> Option<&str> {
        self.color_icon.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn required(value: &str, error: TaskDomainError) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
