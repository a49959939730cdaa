//! Given steps for reordering BDD scenarios.

use super::world::{ReorderWorld, parse_titles, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskdeck::task::domain::{Task, TaskTitle};

#[given(r#"a task list containing "{titles}""#)]
fn task_list_containing(world: &mut ReorderWorld, titles: String) -> Result<(), eyre::Report> {
    let service = world.start()?;
    for title in parse_titles(&titles) {
        let task = Task::new(TaskTitle::new(title.as_str())?, &DefaultClock);
        run_async(service.insert_task(&task)).wrap_err_with(|| format!("insert task {title}"))?;
    }
    Ok(())
}

#[given("manual ordering is enabled")]
fn manual_ordering_enabled(world: &mut ReorderWorld) -> Result<(), eyre::Report> {
    world.service()?.set_manual_order(true);
    Ok(())
}
