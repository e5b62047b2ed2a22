//! Notifier that emits pending-review notices as tracing events.

use async_trait::async_trait;

use crate::review::ports::{PendingReviewNotice, ReviewNotifier, ReviewNotifierError};

/// Writes each notice to the `fastcheck::notify` tracing target.
///
/// Stands in for a push gateway in deployments without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl ReviewNotifier for TracingNotifier {
    async fn notify(&self, notice: &PendingReviewNotice) -> Result<(), ReviewNotifierError> {
        tracing::info!(
            target: "fastcheck::notify",
            owner_id = %notice.owner_id,
            task_id = %notice.task_id,
            due_date = %notice.due_date,
            is_urgent = notice.is_urgent,
            title = %notice.title,
            "task awaiting review"
        );
        Ok(())
    }
}
