//! Service notifying owners about tasks that became due for review.

use crate::review::ports::{
    PendingReviewNotice, ReviewNotifier, SettingsRepository, SettingsRepositoryError,
};
use crate::task::{domain::UserId, services::StatusTransition};
use std::collections::HashMap;
use std::sync::Arc;

/// Counts from one notification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationSummary {
    /// Notices delivered.
    pub delivered: usize,
    /// Transitions skipped because the owner opted out.
    pub skipped: usize,
    /// Notices that could not be delivered or whose owner settings failed.
    pub failed: usize,
}

/// Sends pending-review notices to owners who enabled push notifications.
#[derive(Clone)]
pub struct ReviewNotificationService<S, N>
where
    S: SettingsRepository,
    N: ReviewNotifier,
{
    settings: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> ReviewNotificationService<S, N>
where
    S: SettingsRepository,
    N: ReviewNotifier,
{
    /// Creates a new notification service.
    #[must_use]
    pub const fn new(settings: Arc<S>, notifier: Arc<N>) -> Self {
        Self { settings, notifier }
    }

    /// Notifies owners about transitions into `pending_review`.
    ///
    /// Failures are logged and counted; they never abort the pass.
    pub async fn notify_transitions(
        &self,
        transitions: &[StatusTransition],
    ) -> NotificationSummary {
        let mut summary = NotificationSummary::default();
        let mut preferences: HashMap<UserId, Result<bool, SettingsRepositoryError>> =
            HashMap::new();

        for transition in transitions.iter().filter(|item| item.entered_review()) {
            let owner_id = transition.owner_id;
            let enabled = match preferences.get(&owner_id) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = self
                        .settings
                        .find(owner_id)
                        .await
                        .map(|found| found.is_some_and(|settings| settings.push_notifications));
                    preferences.insert(owner_id, fetched.clone());
                    fetched
                }
            };

            match enabled {
                Ok(true) => self.deliver(transition, &mut summary).await,
                Ok(false) => summary.skipped += 1,
                Err(error) => {
                    summary.failed += 1;
                    tracing::warn!(
                        owner_id = %owner_id,
                        task_id = %transition.task_id,
                        error = %error,
                        "cannot read notification preference"
                    );
                }
            }
        }
        summary
    }

    async fn deliver(&self, transition: &StatusTransition, summary: &mut NotificationSummary) {
        let notice = PendingReviewNotice {
            owner_id: transition.owner_id,
            task_id: transition.task_id,
            title: transition.title.clone(),
            due_date: transition.due_date,
            is_urgent: transition.is_urgent,
        };
        match self.notifier.notify(&notice).await {
            Ok(()) => summary.delivered += 1,
            Err(error) => {
                summary.failed += 1;
                tracing::warn!(
                    owner_id = %notice.owner_id,
                    task_id = %notice.task_id,
                    error = %error,
                    "failed to deliver review notification"
                );
            }
        }
    }
}
