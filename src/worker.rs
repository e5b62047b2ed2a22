//! Background owner of periodic task status refreshes.
//!
//! A single [`StatusRefresher`] recomputes stored statuses on a fixed
//! interval and whenever [`StatusRefresher::trigger`] is called, for example
//! from a database change feed. An in-flight flag makes overlapping runs
//! skip instead of interleaving their writes.

use crate::review::{
    ports::{ReviewNotifier, SettingsRepository},
    services::ReviewNotificationService,
};
use crate::task::{
    ports::{TaskRepository, TaskRepositoryError},
    services::{StatusRefreshReport, TaskStatusService},
};
use mockable::Clock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Periodic status refresh worker.
pub struct StatusRefresher<R, C, S, N>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    S: SettingsRepository,
    N: ReviewNotifier,
{
    statuses: TaskStatusService<R, C>,
    notifications: ReviewNotificationService<S, N>,
    interval: Duration,
    in_flight: AtomicBool,
    wake: Notify,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R, C, S, N> StatusRefresher<R, C, S, N>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    S: SettingsRepository,
    N: ReviewNotifier,
{
    /// Creates a worker that refreshes every `interval`.
    #[must_use]
    pub fn new(
        statuses: TaskStatusService<R, C>,
        notifications: ReviewNotificationService<S, N>,
        interval: Duration,
    ) -> Self {
        Self {
            statuses,
            notifications,
            interval,
            in_flight: AtomicBool::new(false),
            wake: Notify::new(),
        }
    }

    /// Requests a refresh as soon as the running loop is free.
    pub fn trigger(&self) {
        self.wake.notify_one();
    }

    /// Runs one refresh across all owners.
    ///
    /// Returns `Ok(None)` without touching storage when another refresh is
    /// already running.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError`] when open tasks cannot be loaded.
    pub async fn refresh_now(&self) -> Result<Option<StatusRefreshReport>, TaskRepositoryError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("status refresh already running, skipping");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let report = self.statuses.update_all_task_statuses().await?;
        if !report.transitions.is_empty() {
            let summary = self
                .notifications
                .notify_transitions(&report.transitions)
                .await;
            tracing::info!(
                changed = report.transitions.len(),
                failures = report.failures,
                notified = summary.delivered,
                "task statuses updated"
            );
        }
        Ok(Some(report))
    }

    /// Refreshes on every tick and trigger until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "status refresher started"
        );
        let mut interval = ticker(self.interval);

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("status refresher stopping");
                    break;
                }
                _ = interval.tick() => self.refresh_logged().await,
                () = self.wake.notified() => self.refresh_logged().await,
            }
        }
    }

    async fn refresh_logged(&self) {
        if let Err(error) = self.refresh_now().await {
            tracing::error!(error = %error, "status refresh failed");
        }
    }
}

/// Interval that ticks once per period; ticks missed during a slow refresh
/// are delayed instead of fired back to back.
fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
