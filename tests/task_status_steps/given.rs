//! Given steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, march, run_async};
use eyre::WrapErr;
use fastcheck::{
    schedule::TimeWindow,
    task::domain::{NewProject, NewTask},
};
use rstest_bdd_macros::given;

#[given("a project spanning March 2025")]
fn project_spanning_march(world: &mut TaskStatusWorld) -> Result<(), eyre::Report> {
    let request = NewProject {
        owner_id: world.owner_id,
        name: "Spring cleaning".to_owned(),
        description: None,
        color_icon: None,
        window: TimeWindow::new(march(1, 0), march(31, 23))?,
    };
    let project =
        run_async(world.catalog.create_project(request)).wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given("a task scheduled on March {day:u32} between hours {start:u32} and {end:u32}")]
fn task_scheduled(
    world: &mut TaskStatusWorld,
    day: u32,
    start: u32,
    end: u32,
) -> Result<(), eyre::Report> {
    let project_id = world
        .project
        .as_ref()
        .map(fastcheck::task::domain::Project::id)
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let request = NewTask {
        owner_id: world.owner_id,
        project_id,
        parent_id: None,
        executor_id: None,
        title: "Clear the attic".to_owned(),
        description: None,
        window: TimeWindow::new(march(day, start), march(day, end))?,
        is_urgent: false,
    };
    let placement =
        run_async(world.lifecycle.create_task(request)).wrap_err("create scenario task")?;
    world.task_id = Some(placement.task.id());
    Ok(())
}
