//! In-memory integration tests for project, task and subtask lifecycles.

use super::helpers::{Tracker, at, tracker, window};
use chrono::NaiveDate;
use fastcheck::{
    schedule::ScheduleError,
    task::{
        domain::{Task, TaskId, TaskStatus},
        ports::TaskRepository,
        services::{CatalogServiceError, TaskLifecycleError, UpdateTaskRequest},
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtasks_are_confined_to_their_parent(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Garden").await?;
    let parent = tracker
        .task(project.id(), None, "Plant beds", window(at(3, 9), at(5, 17)))
        .await?;
    tracker
        .task(project.id(), Some(parent), "Buy soil", window(at(3, 9), at(3, 12)))
        .await?;

    let outside = tracker
        .task(project.id(), Some(parent), "Water", window(at(5, 9), at(6, 9)))
        .await;
    eyre::ensure!(outside.is_err(), "subtask past the parent due date was accepted");

    let constraints = tracker
        .lifecycle
        .constraints_for(project.id(), Some(parent), None)
        .await?;
    eyre::ensure!(constraints.start_constraint == Some(at(3, 9)));
    eyre::ensure!(constraints.end_constraint == Some(at(3, 12)));
    eyre::ensure!(constraints.blocked_ranges.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn parent_window_cannot_shrink_past_its_subtasks(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Garden").await?;
    let parent = tracker
        .task(project.id(), None, "Plant beds", window(at(3, 9), at(5, 17)))
        .await?;
    tracker
        .task(project.id(), Some(parent), "Mulch", window(at(5, 9), at(5, 12)))
        .await?;

    let result = tracker
        .lifecycle
        .update_task(UpdateTaskRequest::new(parent).with_window(window(at(3, 9), at(4, 17))))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Schedule(ScheduleError::OutsideParent { .. }))
        ),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_parent_removes_its_subtasks(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Garden").await?;
    let parent = tracker
        .task(project.id(), None, "Plant beds", window(at(3, 9), at(5, 17)))
        .await?;
    let child = tracker
        .task(project.id(), Some(parent), "Buy soil", window(at(3, 9), at(3, 12)))
        .await?;

    let removed = tracker.lifecycle.delete_task(parent).await?;

    eyre::ensure!(removed == 2, "expected parent and subtask removed, got {removed}");
    eyre::ensure!(tracker.tasks.find_by_id(child).await?.is_none());
    tracker.catalog.delete_project(project.id()).await?;
    eyre::ensure!(tracker.catalog.list_projects(tracker.owner_id).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_with_tasks_cannot_be_deleted(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Garden").await?;
    tracker
        .task(project.id(), None, "Plant beds", window(at(3, 9), at(5, 17)))
        .await?;

    let result = tracker.catalog.delete_project(project.id()).await;

    eyre::ensure!(matches!(
        result,
        Err(CatalogServiceError::ProjectHasTasks { task_count: 1, .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn calendar_views_select_tasks_by_local_day(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Garden").await?;
    let monday = tracker
        .task(project.id(), None, "Rake", window(at(3, 9), at(3, 11)))
        .await?;
    let friday = tracker
        .task(project.id(), None, "Prune", window(at(7, 9), at(7, 11)))
        .await?;
    let next_week = tracker
        .task(project.id(), None, "Sow", window(at(12, 9), at(12, 11)))
        .await?;
    let date = |day| NaiveDate::from_ymd_opt(2025, 3, day).ok_or_else(|| eyre::eyre!("bad date"));

    let day = tracker.lifecycle.tasks_for_day(tracker.owner_id, date(3)?).await?;
    let week = tracker.lifecycle.tasks_for_week(tracker.owner_id, date(5)?).await?;
    let month = tracker.lifecycle.tasks_for_month(tracker.owner_id, date(20)?).await?;

    let ids = |tasks: &[Task]| tasks.iter().map(Task::id).collect::<Vec<_>>();
    eyre::ensure!(ids(&day) == vec![monday]);
    eyre::ensure!(ids(&week) == vec![monday, friday]);
    eyre::ensure!(ids(&month) == vec![monday, friday, next_week]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresher_tracks_the_clock_through_a_task_window(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker.project("Garden").await?;
    let task_id = tracker
        .task(project.id(), None, "Rake", window(at(3, 9), at(3, 17)))
        .await?;
    eyre::ensure!(stored_status(&tracker, task_id).await? == TaskStatus::Waiting);

    tracker.clock.set(at(3, 12));
    tracker.refresher.refresh_now().await?;
    eyre::ensure!(stored_status(&tracker, task_id).await? == TaskStatus::InProgress);

    tracker.clock.set(at(4, 0));
    tracker.refresher.refresh_now().await?;
    eyre::ensure!(stored_status(&tracker, task_id).await? == TaskStatus::PendingReview);
    Ok(())
}

async fn stored_status(tracker: &Tracker, task_id: TaskId) -> eyre::Result<TaskStatus> {
    tracker
        .tasks
        .find_by_id(task_id)
        .await?
        .map(|task| task.status())
        .ok_or_else(|| eyre::eyre!("task disappeared"))
}
