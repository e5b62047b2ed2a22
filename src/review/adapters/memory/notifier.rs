//! Notifier that records notices in memory.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::review::ports::{PendingReviewNotice, ReviewNotifier, ReviewNotifierError};

/// Collects delivered notices so callers can inspect them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    delivered: Arc<Mutex<Vec<PendingReviewNotice>>>,
}

impl InMemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notice delivered so far.
    #[must_use]
    pub fn delivered(&self) -> Vec<PendingReviewNotice> {
        self.delivered
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReviewNotifier for InMemoryNotifier {
    async fn notify(&self, notice: &PendingReviewNotice) -> Result<(), ReviewNotifierError> {
        let mut delivered = self.delivered.lock().map_err(|err| {
            ReviewNotifierError::delivery(std::io::Error::other(err.to_string()))
        })?;
        delivered.push(notice.clone());
        Ok(())
    }
}
