//! Manual ordering across inserts, moves and deletes.

use super::helpers::{Harness, displayed_titles, harness, insert_all, stored};
use rstest::rstest;
use taskdeck::task::services::TaskListResult;
use taskdeck::task::{domain::SortKey, ports::TaskOrderRepository};

fn positions(harness: &Harness) -> Vec<i64> {
    harness
        .order
        .observe_order()
        .borrow()
        .iter()
        .map(|entry| entry.position())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moves_repack_positions(harness: TaskListResult<Harness>) -> Result<(), eyre::Report> {
    let harness = harness?;
    insert_all(&harness.service, &["A", "B", "C", "D"]).await?;
    harness.service.set_manual_order(true);

    harness.service.move_task(3, 0).await?;
    eyre::ensure!(displayed_titles(&harness.service) == vec!["D", "A", "B", "C"], "first move");

    harness.service.move_task(1, 2).await?;
    eyre::ensure!(displayed_titles(&harness.service) == vec!["D", "B", "A", "C"], "second move");
    eyre::ensure!(positions(&harness) == vec![0, 1, 2, 3], "positions not repacked");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_move_changes_nothing(
    harness: TaskListResult<Harness>,
) -> Result<(), eyre::Report> {
    let harness = harness?;
    insert_all(&harness.service, &["A", "B"]).await?;
    harness.service.set_manual_order(true);

    harness.service.move_task(0, 2).await?;

    eyre::ensure!(displayed_titles(&harness.service) == vec!["A", "B"], "order changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inserted_tasks_follow_existing_ones_after_gaps(
    harness: TaskListResult<Harness>,
) -> Result<(), eyre::Report> {
    let harness = harness?;
    let ids = insert_all(&harness.service, &["A", "B", "C"]).await?;
    let middle = stored(
        &harness.service,
        *ids.get(1).ok_or_else(|| eyre::eyre!("missing id"))?,
    )
    .await?;
    harness.service.delete_task(&middle).await?;
    insert_all(&harness.service, &["D"]).await?;
    harness.service.set_manual_order(true);

    eyre::ensure!(displayed_titles(&harness.service) == vec!["A", "C", "D"], "order");
    eyre::ensure!(positions(&harness) == vec![0, 2, 3], "positions {:?}", positions(&harness));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leaving_manual_mode_restores_the_sort_key(
    harness: TaskListResult<Harness>,
) -> Result<(), eyre::Report> {
    let harness = harness?;
    insert_all(&harness.service, &["b", "a", "c"]).await?;
    harness.service.set_sort_key(SortKey::Alphabetical);
    harness.service.set_manual_order(true);
    harness.service.move_task(2, 0).await?;
    eyre::ensure!(displayed_titles(&harness.service) == vec!["c", "b", "a"], "manual order");

    harness.service.set_manual_order(false);
    eyre::ensure!(displayed_titles(&harness.service) == vec!["a", "b", "c"], "sorted order");
    Ok(())
}
