//! Entity store port for task records.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for task and order store operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Reactive task snapshot stream.
pub type TaskStream = watch::Receiver<Vec<Task>>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Subscribes to every task, ordered by identifier.
    ///
    /// The receiver holds the current snapshot immediately and is notified
    /// after each write.
    fn observe_all(&self) -> TaskStream;

    /// Subscribes to the tasks whose completion flag equals `is_completed`.
    fn observe_by_completion(&self, is_completed: bool) -> TaskStream;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Inserts a task, replacing any record with the same identifier.
    ///
    /// Unsaved tasks receive the next free identifier, which is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskId>;

    /// Replaces the stored record matching the task's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::UnsavedTask`] for a task without an
    /// identifier or [`TaskRepositoryError::NotFound`] when no record matches.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes the record with the given identifier. Missing records are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task and order store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The operation needs a persisted task.
    #[error("task has not been saved yet")]
    UnsavedTask,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
