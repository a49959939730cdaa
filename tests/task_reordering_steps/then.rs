//! Then steps for reordering BDD scenarios.

use super::world::{ReorderWorld, parse_titles};
use rstest_bdd_macros::then;

#[then(r#"the displayed tasks are "{titles}""#)]
fn displayed_tasks_are(world: &ReorderWorld, titles: String) -> Result<(), eyre::Report> {
    let displayed: Vec<String> = world
        .service()?
        .current_tasks()
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();
    let expected = parse_titles(&titles);
    if displayed != expected {
        return Err(eyre::eyre!(
            "expected displayed tasks {expected:?}, found {displayed:?}"
        ));
    }
    Ok(())
}
