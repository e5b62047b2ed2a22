//! Review decisions and the append-only review log.

use super::ParseReviewOutcomeError;
use crate::task::domain::{Task, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a review log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewLogId(Uuid);

impl ReviewLogId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ReviewLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recorded result of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    /// The task was done.
    Completed,
    /// The due date was moved.
    Extended,
    /// The task was abandoned.
    Cancelled,
}

impl ReviewOutcome {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Extended => "extended",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReviewOutcome {
    type Error = ParseReviewOutcomeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "completed" => Ok(Self::Completed),
            "extended" => Ok(Self::Extended),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseReviewOutcomeError(value.to_owned())),
        }
    }
}

/// Decision taken by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Resolve the task as done.
    Completed,
    /// Resolve the task as abandoned.
    Cancelled,
    /// Keep the task open with a later due date.
    Extended {
        /// Replacement due date.
        new_due_date: DateTime<Utc>,
    },
}

impl ReviewDecision {
    /// Returns the outcome recorded for this decision.
    #[must_use]
    pub const fn outcome(&self) -> ReviewOutcome {
        match self {
            Self::Completed => ReviewOutcome::Completed,
            Self::Cancelled => ReviewOutcome::Cancelled,
            Self::Extended { .. } => ReviewOutcome::Extended,
        }
    }

    /// Returns the replacement due date for extensions.
    #[must_use]
    pub const fn new_due_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Extended { new_due_date } => Some(*new_due_date),
            Self::Completed | Self::Cancelled => None,
        }
    }
}

/// One review action, appended and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLog {
    id: ReviewLogId,
    task_id: TaskId,
    owner_id: UserId,
    outcome: ReviewOutcome,
    note: Option<String>,
    new_due_date: Option<DateTime<Utc>>,
    reviewed_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted review log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReviewLog {
    /// Persisted identifier.
    pub id: ReviewLogId,
    /// Reviewed task.
    pub task_id: TaskId,
    /// Reviewing user.
    pub owner_id: UserId,
    /// Recorded outcome.
    pub outcome: ReviewOutcome,
    /// Optional reviewer note.
    pub note: Option<String>,
    /// Replacement due date for extensions.
    pub new_due_date: Option<DateTime<Utc>>,
    /// Review timestamp.
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewLog {
    /// Records `decision` taken on `task` now.
    #[must_use]
    pub fn record(
        task: &Task,
        decision: &ReviewDecision,
        note: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ReviewLogId::new(),
            task_id: task.id(),
            owner_id: task.owner_id(),
            outcome: decision.outcome(),
            note: note
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            new_due_date: decision.new_due_date(),
            reviewed_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReviewLog) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            owner_id: data.owner_id,
            outcome: data.outcome,
            note: data.note,
            new_due_date: data.new_due_date,
            reviewed_at: data.reviewed_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ReviewLogId {
        self.id
    }

    /// Returns the reviewed task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the reviewing user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> ReviewOutcome {
        self.outcome
    }

    /// Returns the reviewer note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the replacement due date for extensions.
    #[must_use]
    pub const fn new_due_date(&self) -> Option<DateTime<Utc>> {
        self.new_due_date
    }

    /// Returns when the review happened.
    #[must_use]
    pub const fn reviewed_at(&self) -> DateTime<Utc> {
        self.reviewed_at
    }
}
