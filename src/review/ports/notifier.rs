//! Port for delivering pending-review notifications.

use crate::task::domain::{TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Notice that a task has moved into `pending_review`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReviewNotice {
    /// User to notify.
    pub owner_id: UserId,
    /// Task awaiting review.
    pub task_id: TaskId,
    /// Task title shown in the notification.
    pub title: String,
    /// Due date that passed.
    pub due_date: DateTime<Utc>,
    /// Whether the task is urgent.
    pub is_urgent: bool,
}

/// Notification delivery contract.
#[async_trait]
pub trait ReviewNotifier: Send + Sync {
    /// Delivers one notice.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewNotifierError::Delivery`] when the notice could not be
    /// delivered.
    async fn notify(&self, notice: &PendingReviewNotice) -> Result<(), ReviewNotifierError>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewNotifierError {
    /// Delivery failed.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewNotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
