//! Service answering review queue, daily prompt and escalation queries.

use crate::config::{CalendarConfig, ReviewPolicy, TrackerConfig};
use crate::review::{
    domain::{
        EscalationRule, ReviewCandidate, ReviewSettings, UrgencyStatus, assess_urgency,
        daily_review_due, select_for_review,
    },
    ports::{
        ReviewLogRepository, ReviewLogRepositoryError, SettingsRepository,
        SettingsRepositoryError,
    },
};
use crate::schedule::calendar;
use crate::task::{
    domain::{Task, UserId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for review queue queries.
#[derive(Debug, Error)]
pub enum ReviewQueueError {
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Review log operation failed.
    #[error(transparent)]
    Log(#[from] ReviewLogRepositoryError),
    /// Settings operation failed.
    #[error(transparent)]
    Settings(#[from] SettingsRepositoryError),
}

/// Result type for review queue operations.
pub type ReviewQueueResult<T> = Result<T, ReviewQueueError>;

/// Review queue and escalation queries.
#[derive(Clone)]
pub struct ReviewQueueService<T, L, S, C>
where
    T: TaskRepository,
    L: ReviewLogRepository,
    S: SettingsRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    logs: Arc<L>,
    settings: Arc<S>,
    clock: Arc<C>,
    policy: ReviewPolicy,
    calendar: CalendarConfig,
}

impl<T, L, S, C> ReviewQueueService<T, L, S, C>
where
    T: TaskRepository,
    L: ReviewLogRepository,
    S: SettingsRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default review policy and calendar.
    #[must_use]
    pub fn new(tasks: Arc<T>, logs: Arc<L>, settings: Arc<S>, clock: Arc<C>) -> Self {
        let defaults = TrackerConfig::default();
        Self {
            tasks,
            logs,
            settings,
            clock,
            policy: defaults.review,
            calendar: defaults.calendar,
        }
    }

    /// Applies review policy and calendar settings from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.policy = config.review;
        self.calendar = config.calendar;
        self
    }

    /// Returns the owner's tasks awaiting review, oldest due date first.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewQueueError::Repository`] when tasks cannot be loaded.
    pub async fn get_tasks_for_review(
        &self,
        owner_id: UserId,
    ) -> ReviewQueueResult<Vec<ReviewCandidate>> {
        let tasks = self.tasks.find_active_by_owner(owner_id).await?;
        Ok(select_for_review(tasks, self.clock.utc()))
    }

    /// Returns `true` when the owner should see the daily review prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewQueueError`] when settings or the review log cannot be
    /// read.
    pub async fn should_show_daily_review(&self, owner_id: UserId) -> ReviewQueueResult<bool> {
        let settings = self.get_settings(owner_id).await?;
        let now = self.clock.utc();
        let offset = self.calendar.utc_offset;
        let reviewed_today = self
            .logs
            .exists_since(owner_id, calendar::local_day_start(now, offset))
            .await?;
        Ok(daily_review_due(
            now,
            settings.review_time,
            offset,
            reviewed_today,
        ))
    }

    /// Returns the escalation state of `task`.
    ///
    /// Urgent tasks escalate after the urgent threshold. Other tasks escalate
    /// at the owner's review time on their due day; when the owner's settings
    /// cannot be read they escalate after the fallback threshold instead.
    pub async fn get_task_urgency_status(&self, task: &Task) -> UrgencyStatus {
        let rule = if task.is_urgent() {
            EscalationRule::AfterOverdue(self.policy.urgent_escalation)
        } else {
            match self.settings.find(task.owner_id()).await {
                Ok(found) => EscalationRule::AtReviewTime {
                    review_time: found.map_or(self.policy.default_review_time, |settings| {
                        settings.review_time
                    }),
                    offset: self.calendar.utc_offset,
                },
                Err(error) => {
                    tracing::warn!(
                        owner_id = %task.owner_id(),
                        error = %error,
                        "review settings unavailable, using overdue fallback"
                    );
                    EscalationRule::AfterOverdue(self.policy.fallback_escalation)
                }
            }
        };
        assess_urgency(task, self.clock.utc(), &rule)
    }

    /// Returns the owner's settings, or the defaults when never saved.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewQueueError::Settings`] when the lookup fails.
    pub async fn get_settings(&self, owner_id: UserId) -> ReviewQueueResult<ReviewSettings> {
        let stored = self.settings.find(owner_id).await?;
        Ok(stored.unwrap_or_else(|| {
            ReviewSettings::new(owner_id, self.policy.default_review_time, false)
        }))
    }

    /// Saves the owner's settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewQueueError::Settings`] when the write fails.
    pub async fn save_settings(&self, settings: &ReviewSettings) -> ReviewQueueResult<()> {
        self.settings.save(settings).await?;
        tracing::debug!(
            owner_id = %settings.owner_id,
            review_time = %settings.review_time_label(),
            "review settings saved"
        );
        Ok(())
    }
}
