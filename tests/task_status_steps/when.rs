//! When steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, march, run_async};
use eyre::WrapErr;
use fastcheck::review::{
    domain::{ReviewDecision, ReviewOutcome},
    services::ReviewTaskRequest,
};
use rstest_bdd_macros::when;

#[when("the clock reads March {day:u32} at hour {hour:u32} and statuses refresh")]
fn clock_reads(world: &mut TaskStatusWorld, day: u32, hour: u32) -> Result<(), eyre::Report> {
    world.clock.set(march(day, hour));
    run_async(world.statuses.update_task_statuses(world.owner_id))
        .wrap_err("refresh statuses")?;
    Ok(())
}

#[when("the task is extended to March {day:u32} at hour {hour:u32}")]
fn task_extended(world: &mut TaskStatusWorld, day: u32, hour: u32) -> Result<(), eyre::Report> {
    let decision = ReviewDecision::Extended {
        new_due_date: march(day, hour),
    };
    review(world, decision)
}

#[when(r#"the task is marked "{outcome}""#)]
fn task_marked(world: &mut TaskStatusWorld, outcome: String) -> Result<(), eyre::Report> {
    let decision = match ReviewOutcome::try_from(outcome.as_str())? {
        ReviewOutcome::Completed => ReviewDecision::Completed,
        ReviewOutcome::Cancelled => ReviewDecision::Cancelled,
        ReviewOutcome::Extended => eyre::bail!("extensions need a due date"),
    };
    review(world, decision)
}

fn review(world: &mut TaskStatusWorld, decision: ReviewDecision) -> Result<(), eyre::Report> {
    let request = ReviewTaskRequest::new(world.task_id()?, decision);
    world.last_review = Some(run_async(world.decisions.review_task(request)));
    Ok(())
}
