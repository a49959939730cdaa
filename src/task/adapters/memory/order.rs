//! In-memory order store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use super::poisoned;
use crate::task::{
    domain::{OrderEntry, TaskId, relocate},
    ports::{OrderStream, TaskOrderRepository, TaskRepositoryResult},
};

/// Thread-safe in-memory order repository.
#[derive(Debug, Clone)]
pub struct InMemoryTaskOrderRepository {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    positions: RwLock<BTreeMap<TaskId, i64>>,
    order: watch::Sender<Vec<OrderEntry>>,
}

/// Entries ascending by position; equal positions keep task-identifier order.
fn sorted_entries(positions: &BTreeMap<TaskId, i64>) -> Vec<OrderEntry> {
    let mut entries: Vec<OrderEntry> = positions
        .iter()
        .map(|(task_id, position)| OrderEntry::new(*task_id, *position))
        .collect();
    entries.sort_by_key(|entry| entry.position());
    entries
}

impl InMemoryTaskOrderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let (order, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                positions: RwLock::new(BTreeMap::new()),
                order,
            }),
        }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, BTreeMap<TaskId, i64>>> {
        self.shared.positions.read().map_err(poisoned)
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, BTreeMap<TaskId, i64>>> {
        self.shared.positions.write().map_err(poisoned)
    }

    fn publish(&self, positions: &BTreeMap<TaskId, i64>) {
        self.shared.order.send_replace(sorted_entries(positions));
    }
}

impl Default for InMemoryTaskOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskOrderRepository for InMemoryTaskOrderRepository {
    fn observe_order(&self) -> OrderStream {
        self.shared.order.subscribe()
    }

    async fn find_by_task_id(&self, task_id: TaskId) -> TaskRepositoryResult<Option<OrderEntry>> {
        let positions = self.read()?;
        Ok(positions
            .get(&task_id)
            .map(|position| OrderEntry::new(task_id, *position)))
    }

    async fn max_position(&self) -> TaskRepositoryResult<Option<i64>> {
        let positions = self.read()?;
        Ok(positions.values().copied().max())
    }

    async fn insert(&self, entry: OrderEntry) -> TaskRepositoryResult<()> {
        let mut positions = self.write()?;
        positions.insert(entry.task_id(), entry.position());
        self.publish(&positions);
        Ok(())
    }

    async fn insert_all(&self, entries: &[OrderEntry]) -> TaskRepositoryResult<()> {
        let mut positions = self.write()?;
        positions.extend(
            entries
                .iter()
                .map(|entry| (entry.task_id(), entry.position())),
        );
        self.publish(&positions);
        Ok(())
    }

    async fn delete_by_task_id(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut positions = self.write()?;
        if positions.remove(&task_id).is_some() {
            self.publish(&positions);
        }
        Ok(())
    }

    async fn move_task(&self, from: usize, to: usize) -> TaskRepositoryResult<()> {
        let mut positions = self.write()?;
        let Some(reordered) = relocate(sorted_entries(&positions), from, to) else {
            return Ok(());
        };
        positions.extend(
            reordered
                .iter()
                .map(|entry| (entry.task_id(), entry.position())),
        );
        self.publish(&positions);
        Ok(())
    }
}
