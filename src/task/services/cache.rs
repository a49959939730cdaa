//! Optimistic overlay of not-yet-confirmed task versions.

use crate::task::domain::{Task, TaskId};
use std::collections::HashMap;

/// Pending task versions keyed by identifier.
///
/// Each insertion gets a fresh generation so that a delayed eviction scheduled
/// for an older write never removes a newer pending version. A version only
/// becomes confirmable once its own write has succeeded; until then an equal
/// stored task is left over from an earlier state, not a confirmation.
#[derive(Debug, Default)]
pub struct OptimisticCache {
    entries: HashMap<TaskId, PendingTask>,
    next_generation: u64,
}

#[derive(Debug)]
struct PendingTask {
    task: Task,
    generation: u64,
    written: bool,
}

impl OptimisticCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pending version and returns its generation.
    pub fn insert(&mut self, id: TaskId, task: Task) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        let generation = self.next_generation;
        self.entries.insert(
            id,
            PendingTask {
                task,
                generation,
                written: false,
            },
        );
        generation
    }

    /// Marks the version for `id` as written, if it is still `generation`.
    pub fn mark_written(&mut self, id: TaskId, generation: u64) -> bool {
        let Some(pending) = self
            .entries
            .get_mut(&id)
            .filter(|pending| pending.generation == generation)
        else {
            return false;
        };
        pending.written = true;
        true
    }

    /// Drops the pending version for `id`, whatever its generation.
    pub fn evict(&mut self, id: TaskId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drops the pending version for `id` only if it is still `generation`.
    pub fn evict_generation(&mut self, id: TaskId, generation: u64) -> bool {
        let is_current = self
            .entries
            .get(&id)
            .is_some_and(|pending| pending.generation == generation);
        if is_current {
            self.entries.remove(&id);
        }
        is_current
    }

    /// Drops every written version the store snapshot already reflects.
    pub fn confirm(&mut self, stored: &[Task]) -> usize {
        let before = self.entries.len();
        for task in stored {
            let Some(id) = task.id() else { continue };
            if self
                .entries
                .get(&id)
                .is_some_and(|pending| pending.written && pending.task == *task)
            {
                self.entries.remove(&id);
            }
        }
        before.saturating_sub(self.entries.len())
    }

    /// Returns the pending version of `task` when one exists, otherwise the
    /// task itself.
    #[must_use]
    pub fn overlay(&self, task: &Task) -> Task {
        task.id()
            .and_then(|id| self.entries.get(&id))
            .map_or_else(|| task.clone(), |pending| pending.task.clone())
    }

    /// Returns the pending version for `id`, if any.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries.get(&id).map(|pending| &pending.task)
    }

    /// Number of pending versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
