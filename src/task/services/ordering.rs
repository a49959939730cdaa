//! Derivation of the displayed task list.
//!
//! The displayed list is a pure function of the stored tasks, the stored
//! manual order, the view selection and the optimistic cache:
//!
//! 1. Narrow by status filter and search query.
//! 2. Substitute pending cached versions for stored ones.
//! 3. Order by manual position, or by the automatic sort key.
//!
//! All sorts are stable, so equal keys keep their incoming order.

use super::OptimisticCache;
use crate::task::domain::{OrderEntry, SortKey, Task, TaskId, ViewSelection};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Builds the ordered list shown to the user.
#[must_use]
pub fn arrange_tasks(
    stored: &[Task],
    order: &[OrderEntry],
    selection: &ViewSelection,
    cache: &OptimisticCache,
) -> Vec<Task> {
    let needle = selection.search_needle();
    let mut visible: Vec<Task> = stored
        .iter()
        .filter(|task| selection.admits(task, needle.as_deref()))
        .map(|task| cache.overlay(task))
        .collect();

    if selection.manual_order {
        apply_manual_order(&mut visible, order);
        visible
    } else {
        apply_sort_key(visible, selection.sort_key)
    }
}

/// Sorts ascending by stored position. Tasks without an entry go last.
pub fn apply_manual_order(tasks: &mut [Task], order: &[OrderEntry]) {
    let positions: HashMap<TaskId, i64> = order
        .iter()
        .map(|entry| (entry.task_id(), entry.position()))
        .collect();
    tasks.sort_by_key(|task| {
        let position = task.id().and_then(|id| positions.get(&id).copied());
        (position.is_none(), position.unwrap_or_default())
    });
}

/// Sorts by an automatic key.
///
/// Under [`SortKey::DueDate`] every undated task is moved, as one block in
/// incoming order, behind all dated tasks.
#[must_use]
pub fn apply_sort_key(mut tasks: Vec<Task>, sort_key: SortKey) -> Vec<Task> {
    match sort_key {
        SortKey::Priority => {
            tasks.sort_by(|a, b| b.priority().cmp(&a.priority()));
            tasks
        }
        SortKey::DueDate => {
            let (mut dated, undated): (Vec<Task>, Vec<Task>) = tasks
                .into_iter()
                .partition(|task| task.due_date().is_some());
            dated.sort_by_key(Task::due_date);
            dated.extend(undated);
            dated
        }
        SortKey::Alphabetical => {
            tasks.sort_by(|a, b| compare_case_insensitive(a.title().as_str(), b.title().as_str()));
            tasks
        }
    }
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
