//! In-memory entity store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use super::poisoned;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStream},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    state: RwLock<InMemoryTaskState>,
    all: watch::Sender<Vec<Task>>,
    completed: watch::Sender<Vec<Task>>,
    pending: watch::Sender<Vec<Task>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let (all, _) = watch::channel(Vec::new());
        let (completed, _) = watch::channel(Vec::new());
        let (pending, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(InMemoryTaskState::default()),
                all,
                completed,
                pending,
            }),
        }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.shared.state.read().map_err(poisoned)
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.shared.state.write().map_err(poisoned)
    }

    fn publish(&self, state: &InMemoryTaskState) {
        let all: Vec<Task> = state.tasks.values().cloned().collect();
        let (completed, pending): (Vec<Task>, Vec<Task>) =
            all.iter().cloned().partition(Task::is_completed);
        self.shared.all.send_replace(all);
        self.shared.completed.send_replace(completed);
        self.shared.pending.send_replace(pending);
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    fn observe_all(&self) -> TaskStream {
        self.shared.all.subscribe()
    }

    fn observe_by_completion(&self, is_completed: bool) -> TaskStream {
        if is_completed {
            self.shared.completed.subscribe()
        } else {
            self.shared.pending.subscribe()
        }
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write()?;
        let id = match task.id() {
            Some(id) => id,
            None => TaskId::new(state.last_id.saturating_add(1))
                .map_err(TaskRepositoryError::persistence)?,
        };
        state.last_id = state.last_id.max(id.value());
        state.tasks.insert(id, task.with_id(id));
        self.publish(&state);
        Ok(id)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id().ok_or(TaskRepositoryError::UnsavedTask)?;
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        *stored = task.clone();
        self.publish(&state);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_some() {
            self.publish(&state);
        }
        Ok(())
    }
}
