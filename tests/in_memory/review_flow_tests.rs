//! In-memory integration tests for the overdue review workflow.

use super::helpers::{Tracker, at, tracker, window};
use chrono::NaiveTime;
use fastcheck::{
    review::{
        domain::{ReviewDecision, ReviewSettings},
        services::{ReviewDecisionError, ReviewTaskRequest},
    },
    task::{
        domain::{TaskDomainError, TaskStatus},
        ports::TaskRepository,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_is_reviewed_and_leaves_the_queue(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Quarter close").await?;
    let task_id = tracker
        .task(project.id(), None, "Reconcile ledger", window(at(2, 9), at(2, 17)))
        .await?;
    tracker
        .queue
        .save_settings(&ReviewSettings::new(
            tracker.owner_id,
            NaiveTime::from_hms_opt(9, 0, 0).ok_or_else(|| eyre::eyre!("bad time"))?,
            true,
        ))
        .await?;

    tracker.clock.set(at(3, 0));
    tracker.refresher.refresh_now().await?;
    eyre::ensure!(tracker.notifier.delivered().len() == 1);
    let queue = tracker.queue.get_tasks_for_review(tracker.owner_id).await?;
    eyre::ensure!(queue.iter().map(|c| c.task.id()).eq([task_id]));

    tracker.clock.set(at(3, 9));
    eyre::ensure!(tracker.queue.should_show_daily_review(tracker.owner_id).await?);
    tracker
        .decisions
        .review_task(ReviewTaskRequest::new(task_id, ReviewDecision::Completed))
        .await?;

    eyre::ensure!(!tracker.queue.should_show_daily_review(tracker.owner_id).await?);
    eyre::ensure!(tracker.queue.get_tasks_for_review(tracker.owner_id).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extension_reopens_then_expires_again(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Quarter close").await?;
    let task_id = tracker
        .task(project.id(), None, "Reconcile ledger", window(at(2, 9), at(2, 17)))
        .await?;
    tracker.clock.set(at(3, 10));
    tracker.refresher.refresh_now().await?;

    let reviewed = tracker
        .decisions
        .review_task(ReviewTaskRequest::new(
            task_id,
            ReviewDecision::Extended {
                new_due_date: at(4, 17),
            },
        ))
        .await?;
    eyre::ensure!(reviewed.task.status() == TaskStatus::InProgress);
    eyre::ensure!(reviewed.log.new_due_date() == Some(at(4, 17)));

    tracker.clock.set(at(5, 0));
    tracker.refresher.refresh_now().await?;
    let stored = tracker
        .tasks
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task disappeared"))?;
    eyre::ensure!(stored.status() == TaskStatus::PendingReview);
    eyre::ensure!(stored.due_date() == at(4, 17));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_task_stays_cancelled(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Quarter close").await?;
    let task_id = tracker
        .task(project.id(), None, "Archive invoices", window(at(2, 9), at(2, 17)))
        .await?;
    tracker.clock.set(at(3, 10));
    tracker.refresher.refresh_now().await?;
    tracker
        .decisions
        .review_task(ReviewTaskRequest::new(task_id, ReviewDecision::Cancelled))
        .await?;

    tracker.clock.set(at(9, 10));
    let report = tracker
        .refresher
        .refresh_now()
        .await?
        .ok_or_else(|| eyre::eyre!("refresh skipped"))?;
    let again = tracker
        .decisions
        .review_task(ReviewTaskRequest::new(
            task_id,
            ReviewDecision::Extended {
                new_due_date: at(10, 17),
            },
        ))
        .await;

    eyre::ensure!(report.examined == 0, "resolved tasks are not refreshed");
    eyre::ensure!(matches!(
        again,
        Err(ReviewDecisionError::Domain(TaskDomainError::AlreadyResolved { .. }))
    ));
    Ok(())
}
