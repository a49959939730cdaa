//! Reactive task list: derived view, statistics, selection and commands.

use super::{OptimisticCache, StatisticsAggregator, TaskListConfig, arrange_tasks};
use crate::task::{
    domain::{
        OrderEntry, SortKey, Task, TaskDomainError, TaskFilter, TaskId, TaskStatistics,
        ViewSelection,
    },
    ports::{
        OrderStream, TaskOrderRepository, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, TaskStream,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// Service-level errors for task list operations.
#[derive(Debug, Error)]
pub enum TaskListError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The service was started outside a Tokio runtime.
    #[error("task list service requires a Tokio runtime: {0}")]
    Runtime(#[from] TryCurrentError),
}

/// Result type for task list service operations.
pub type TaskListResult<T> = Result<T, TaskListError>;

/// Reactive task list over an entity store and an order store.
///
/// Outputs are `watch` receivers recomputed whenever a store emits, the
/// selection changes, or the optimistic cache changes. Commands write to the
/// stores; toggling completion shows its result at once through the cache.
pub struct TaskListService<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    shared: Arc<Shared<T, O, C>>,
}

struct Shared<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    tasks: Arc<T>,
    order: Arc<O>,
    clock: Arc<C>,
    config: TaskListConfig,
    stored: TaskStream,
    stored_order: OrderStream,
    statistics: StatisticsAggregator<C>,
    selection: watch::Sender<ViewSelection>,
    cache: Mutex<OptimisticCache>,
    view: watch::Sender<Vec<Task>>,
    stats: watch::Sender<TaskStatistics>,
    reconciler: Mutex<Option<AbortHandle>>,
}

impl<T, O, C> TaskListService<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Subscribes to both stores and spawns the reconciliation task on the
    /// current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Runtime`] when called outside a runtime.
    pub fn start(
        tasks: Arc<T>,
        order: Arc<O>,
        clock: Arc<C>,
        config: TaskListConfig,
    ) -> TaskListResult<Self> {
        let runtime = Handle::try_current()?;
        let (selection, _) = watch::channel(config.initial_selection().clone());
        let (view, _) = watch::channel(Vec::new());
        let (stats, _) = watch::channel(TaskStatistics::default());
        let shared = Arc::new(Shared {
            stored: tasks.observe_all(),
            stored_order: order.observe_order(),
            statistics: StatisticsAggregator::new(&*tasks, Arc::clone(&clock)),
            tasks,
            order,
            clock,
            config,
            selection,
            cache: Mutex::new(OptimisticCache::new()),
            view,
            stats,
            reconciler: Mutex::new(None),
        });
        shared.refresh();

        let handle = runtime.spawn(reconcile(
            Arc::downgrade(&shared),
            shared.stored.clone(),
            shared.stored_order.clone(),
            shared.statistics.clone(),
        ));
        *lock(&shared.reconciler) = Some(handle.abort_handle());
        Ok(Self { shared })
    }

    // ── Outputs ──────────────────────────────────────────────────────

    /// Subscribes to the ordered task list.
    #[must_use]
    pub fn tasks(&self) -> watch::Receiver<Vec<Task>> {
        self.shared.view.subscribe()
    }

    /// Returns the ordered task list as of now.
    #[must_use]
    pub fn current_tasks(&self) -> Vec<Task> {
        self.shared.view.borrow().clone()
    }

    /// Subscribes to task statistics.
    #[must_use]
    pub fn statistics(&self) -> watch::Receiver<TaskStatistics> {
        self.shared.stats.subscribe()
    }

    /// Returns task statistics as of now.
    #[must_use]
    pub fn current_statistics(&self) -> TaskStatistics {
        *self.shared.stats.borrow()
    }

    /// Today's date according to the injected clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.shared.clock.local().date_naive()
    }

    pub(crate) fn clock(&self) -> &Arc<C> {
        &self.shared.clock
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Subscribes to the view selection.
    #[must_use]
    pub fn selection(&self) -> watch::Receiver<ViewSelection> {
        self.shared.selection.subscribe()
    }

    /// Returns the active status filter.
    #[must_use]
    pub fn filter(&self) -> TaskFilter {
        self.shared.selection.borrow().filter
    }

    /// Returns the active sort key.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.shared.selection.borrow().sort_key
    }

    /// Returns `true` while manual ordering is active.
    #[must_use]
    pub fn is_manual_order(&self) -> bool {
        self.shared.selection.borrow().manual_order
    }

    /// Replaces the status filter.
    pub fn set_filter(&self, filter: TaskFilter) {
        self.update_selection(|selection| selection.filter = filter);
    }

    /// Replaces the automatic sort key.
    pub fn set_sort_key(&self, sort_key: SortKey) {
        self.update_selection(|selection| selection.sort_key = sort_key);
    }

    /// Switches manual ordering on or off.
    pub fn set_manual_order(&self, manual_order: bool) {
        self.update_selection(|selection| selection.manual_order = manual_order);
    }

    /// Flips manual ordering.
    pub fn toggle_manual_order(&self) {
        self.update_selection(|selection| selection.manual_order = !selection.manual_order);
    }

    /// Replaces the search query. A blank query shows everything.
    pub fn set_search_query(&self, query: Option<String>) {
        self.update_selection(|selection| selection.search = query);
    }

    fn update_selection(&self, apply: impl FnOnce(&mut ViewSelection)) {
        self.shared.selection.send_modify(apply);
        self.shared.refresh();
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flips a task's completion flag.
    ///
    /// The flipped version is shown immediately and stops masking the store
    /// once its write has landed and the store reflects it, the write fails,
    /// or the settle delay elapses, whichever happens first. A newer toggle of
    /// the same task keeps masking until its own write lands.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when the task is unsaved or the
    /// write fails.
    pub async fn toggle_completion(&self, task: &Task) -> TaskListResult<()> {
        let id = task.id().ok_or(TaskRepositoryError::UnsavedTask)?;
        let pending = task.toggled();
        debug!(task_id = %id, is_completed = pending.is_completed(), "toggling task completion");

        let generation = self.shared.cache().insert(id, pending.clone());
        self.shared.refresh();
        self.shared.schedule_eviction(id, generation);

        let result = self.shared.tasks.update(&pending).await;
        if result.is_ok() {
            self.shared.cache().mark_written(id, generation);
        } else {
            let evicted = self.shared.cache().evict_generation(id, generation);
            if evicted {
                debug!(task_id = %id, "reverting optimistic update after failed write");
            }
        }
        self.shared.refresh();
        log_failure("toggle completion", result)
    }

    /// Deletes a task and its order entry.
    ///
    /// Unsaved tasks are ignored. Callers wanting undo keep a copy and pass
    /// it to [`Self::restore_task`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when either store write fails.
    pub async fn delete_task(&self, task: &Task) -> TaskListResult<()> {
        let Some(id) = task.id() else {
            return Ok(());
        };
        self.shared.cache().evict(id);
        self.shared.refresh();

        debug!(task_id = %id, "deleting task");
        log_failure("delete task", self.shared.tasks.delete(id).await)?;
        let order_result = self.shared.order.delete_by_task_id(id).await;
        self.shared.refresh();
        log_failure("delete order entry", order_result)
    }

    /// Re-inserts a previously deleted task.
    ///
    /// A saved task keeps its identifier; its manual position is not kept and
    /// it is appended after every ordered task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when either store write fails.
    pub async fn restore_task(&self, task: &Task) -> TaskListResult<TaskId> {
        debug!(task_id = ?task.id(), "restoring task");
        self.insert_task(task).await
    }

    /// Persists a task and appends it to the manual order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when either store write fails.
    pub async fn insert_task(&self, task: &Task) -> TaskListResult<TaskId> {
        let id = log_failure("insert task", self.shared.tasks.insert(task).await)?;
        let max_position = log_failure(
            "read max position",
            self.shared.order.max_position().await,
        )?;
        let entry = OrderEntry::new(id, OrderEntry::next_position(max_position));
        let order_result = self.shared.order.insert(entry).await;
        self.shared.refresh();
        log_failure("insert order entry", order_result)?;
        debug!(task_id = %id, position = entry.position(), "inserted task");
        Ok(id)
    }

    /// Moves the task at manual index `from` to index `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when the order store write fails.
    pub async fn move_task(&self, from: usize, to: usize) -> TaskListResult<()> {
        debug!(from, to, "moving task");
        let result = self.shared.order.move_task(from, to).await;
        self.shared.refresh();
        log_failure("move task", result)
    }

    /// Replaces a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when the task is unknown or the
    /// write fails.
    pub async fn update_task(&self, task: &Task) -> TaskListResult<()> {
        let result = self.shared.tasks.update(task).await;
        self.shared.refresh();
        log_failure("update task", result)
    }

    /// Looks a task up by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Repository`] when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> TaskListResult<Option<Task>> {
        Ok(self.shared.tasks.find_by_id(id).await?)
    }
}

impl<T, O, C> Clone for TaskListService<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, O, C> Shared<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn cache(&self) -> MutexGuard<'_, OptimisticCache> {
        lock(&self.cache)
    }

    /// Recomputes and publishes both outputs.
    ///
    /// The cache lock is held throughout, so concurrent refreshes publish in
    /// the order they read their inputs.
    fn refresh(&self) {
        let mut cache = self.cache();
        let arranged = {
            let stored = self.stored.borrow();
            let confirmed = cache.confirm(&stored);
            if confirmed > 0 {
                debug!(confirmed, "store confirmed optimistic updates");
            }
            let order = self.stored_order.borrow();
            let selection = self.selection.borrow();
            arrange_tasks(&stored, &order, &selection, &cache)
        };
        let statistics = self.statistics.current();

        self.view.send_if_modified(|current| {
            if *current == arranged {
                return false;
            }
            *current = arranged;
            true
        });
        self.stats.send_if_modified(|current| {
            if *current == statistics {
                return false;
            }
            *current = statistics;
            true
        });
        drop(cache);
    }

    fn schedule_eviction(self: &Arc<Self>, id: TaskId, generation: u64) {
        let shared = Arc::downgrade(self);
        let delay = self.config.settle_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(live) = shared.upgrade() else {
                return;
            };
            let evicted = live.cache().evict_generation(id, generation);
            if evicted {
                debug!(task_id = %id, "settle delay elapsed, dropping optimistic update");
                live.refresh();
            }
        });
    }
}

impl<T, O, C> Drop for Shared<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.reconciler).take() {
            handle.abort();
        }
    }
}

/// Recomputes the outputs whenever a store emits, until the service or a
/// store goes away.
async fn reconcile<T, O, C>(
    shared: Weak<Shared<T, O, C>>,
    mut stored: TaskStream,
    mut stored_order: OrderStream,
    mut statistics: StatisticsAggregator<C>,
) where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    loop {
        let changed = tokio::select! {
            result = stored.changed() => result,
            result = stored_order.changed() => result,
            result = statistics.changed() => result,
        };
        if changed.is_err() {
            debug!("task store closed, stopping reconciliation");
            break;
        }
        let Some(live) = shared.upgrade() else {
            break;
        };
        live.refresh();
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn log_failure<V>(operation: &'static str, result: TaskRepositoryResult<V>) -> TaskListResult<V> {
    result.map_err(|err| {
        warn!(operation, error = %err, "task store operation failed");
        TaskListError::from(err)
    })
}
