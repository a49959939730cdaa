//! Manual ordering entries.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// Position of one task in the user's manual order.
///
/// Positions need not be contiguous. The task identifier is the entry's key,
/// so one snapshot never holds two entries for the same task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderEntry {
    task_id: TaskId,
    position: i64,
}

impl OrderEntry {
    /// Creates an order entry.
    #[must_use]
    pub const fn new(task_id: TaskId, position: i64) -> Self {
        Self { task_id, position }
    }

    /// Returns the ordered task.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        self.task_id
    }

    /// Returns the position.
    #[must_use]
    pub const fn position(self) -> i64 {
        self.position
    }

    /// Returns the position a newly appended entry receives after `max`.
    #[must_use]
    pub const fn next_position(max: Option<i64>) -> i64 {
        match max {
            Some(position) => position.saturating_add(1),
            None => 0,
        }
    }
}

/// Moves the entry at index `from` to index `to` and repacks positions.
///
/// `entries` must be sorted ascending by position. The removal is applied
/// before the insertion, so moving index 1 to index 3 shifts the entries at
/// 2 and 3 down by one. Every returned entry has its position set to its new
/// index. Returns `None` when either index is out of range.
#[must_use]
pub fn relocate(mut entries: Vec<OrderEntry>, from: usize, to: usize) -> Option<Vec<OrderEntry>> {
    if from >= entries.len() || to >= entries.len() {
        return None;
    }
    let moved = entries.remove(from);
    entries.insert(to, moved);
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = i64::try_from(index).unwrap_or(i64::MAX);
    }
    Some(entries)
}
