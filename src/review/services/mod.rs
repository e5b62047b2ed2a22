//! Application services for reviews, the review queue and notifications.

mod decision;
mod notification;
mod queue;

pub use decision::{
    ReviewDecisionError, ReviewDecisionResult, ReviewDecisionService, ReviewTaskRequest,
    ReviewedTask,
};
pub use notification::{NotificationSummary, ReviewNotificationService};
pub use queue::{ReviewQueueError, ReviewQueueResult, ReviewQueueService};
