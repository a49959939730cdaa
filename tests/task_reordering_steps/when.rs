//! When steps for reordering BDD scenarios.

use super::world::{ReorderWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdeck::task::domain::SortKey;

#[when("the task at position {from:usize} is moved to position {to:usize}")]
fn move_task(world: &mut ReorderWorld, from: usize, to: usize) -> Result<(), eyre::Report> {
    run_async(world.service()?.move_task(from, to))
        .wrap_err_with(|| format!("move task from {from} to {to}"))
}

#[when(r#"the sort key is set to "{key}""#)]
fn set_sort_key(world: &mut ReorderWorld, key: String) -> Result<(), eyre::Report> {
    let sort_key = SortKey::try_from(key.as_str())?;
    world.service()?.set_sort_key(sort_key);
    Ok(())
}
