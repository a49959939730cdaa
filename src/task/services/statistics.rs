//! Statistics over the entity store streams.

use crate::task::{
    domain::TaskStatistics,
    ports::{TaskRepository, TaskStream},
};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::watch::error::RecvError;

/// Combines the full task stream and the completed-subset stream into
/// [`TaskStatistics`].
///
/// Holds no state beyond its subscriptions; every read recomputes.
pub struct StatisticsAggregator<C>
where
    C: Clock + Send + Sync,
{
    all: TaskStream,
    completed: TaskStream,
    clock: Arc<C>,
}

impl<C> StatisticsAggregator<C>
where
    C: Clock + Send + Sync,
{
    /// Subscribes to the repository's full and completed streams.
    #[must_use]
    pub fn new<R>(repository: &R, clock: Arc<C>) -> Self
    where
        R: TaskRepository + ?Sized,
    {
        Self {
            all: repository.observe_all(),
            completed: repository.observe_by_completion(true),
            clock,
        }
    }

    /// Statistics for the latest snapshots, judged against today's date.
    #[must_use]
    pub fn current(&self) -> TaskStatistics {
        let today = self.clock.local().date_naive();
        let all = self.all.borrow();
        let completed = self.completed.borrow();
        TaskStatistics::from_snapshots(&all, &completed, today)
    }

    /// Waits until either upstream stream emits.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError`] once an upstream store has been dropped.
    pub async fn changed(&mut self) -> Result<(), RecvError> {
        tokio::select! {
            result = self.all.changed() => result,
            result = self.completed.changed() => result,
        }
    }
}

impl<C> Clone for StatisticsAggregator<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            all: self.all.clone(),
            completed: self.completed.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}
