//! Then steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use fastcheck::{
    review::{domain::ReviewOutcome, ports::ReviewLogRepository, services::ReviewDecisionError},
    task::domain::{TaskDomainError, TaskStatus},
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskStatusWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let task = run_async(world.lifecycle.find_task(world.task_id()?))?
        .ok_or_else(|| eyre::eyre!("task disappeared"))?;

    eyre::ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the review log records an "{outcome}" outcome"#)]
fn review_log_records(world: &TaskStatusWorld, outcome: String) -> Result<(), eyre::Report> {
    let expected = ReviewOutcome::try_from(outcome.as_str())?;
    let history = run_async(world.logs.find_by_task(world.task_id()?))?;

    eyre::ensure!(
        history.iter().map(|entry| entry.outcome()).eq([expected]),
        "unexpected review history: {history:?}"
    );
    Ok(())
}

#[then("the daily review is shown")]
fn daily_review_shown(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let shown = run_async(world.queue.should_show_daily_review(world.owner_id))?;
    eyre::ensure!(shown, "expected the daily review prompt");
    Ok(())
}

#[then("the daily review is hidden")]
fn daily_review_hidden(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let shown = run_async(world.queue.should_show_daily_review(world.owner_id))?;
    eyre::ensure!(!shown, "daily review prompt still shown");
    Ok(())
}

#[then("the review fails because the task is already resolved")]
fn review_fails_already_resolved(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_review
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review result"))?;

    eyre::ensure!(
        matches!(
            result,
            Err(ReviewDecisionError::Domain(TaskDomainError::AlreadyResolved { .. }))
        ),
        "expected AlreadyResolved, got {result:?}"
    );
    Ok(())
}
