//! Order store port for manual task positions.

use super::TaskRepositoryResult;
use crate::task::domain::{OrderEntry, TaskId};
use async_trait::async_trait;
use tokio::sync::watch;

/// Reactive order snapshot stream, ascending by position.
pub type OrderStream = watch::Receiver<Vec<OrderEntry>>;

/// Manual ordering persistence contract.
///
/// Entries are keyed by task identifier; inserting an entry for a task that
/// already has one replaces it.
#[async_trait]
pub trait TaskOrderRepository: Send + Sync {
    /// Subscribes to all entries, ascending by position.
    fn observe_order(&self) -> OrderStream;

    /// Finds the entry for a task.
    async fn find_by_task_id(&self, task_id: TaskId) -> TaskRepositoryResult<Option<OrderEntry>>;

    /// Returns the highest stored position, or `None` when empty.
    async fn max_position(&self) -> TaskRepositoryResult<Option<i64>>;

    /// Inserts or replaces one entry.
    async fn insert(&self, entry: OrderEntry) -> TaskRepositoryResult<()>;

    /// Inserts or replaces several entries in one write.
    async fn insert_all(&self, entries: &[OrderEntry]) -> TaskRepositoryResult<()>;

    /// Deletes the entry for a task. Missing entries are ignored.
    async fn delete_by_task_id(&self, task_id: TaskId) -> TaskRepositoryResult<()>;

    /// Moves the entry at index `from` to index `to` of the position-sorted
    /// list and repacks every position to its index, in one write.
    ///
    /// Out-of-range indices leave the store untouched.
    async fn move_task(&self, from: usize, to: usize) -> TaskRepositoryResult<()>;
}
