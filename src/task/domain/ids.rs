//! Identifier types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate key assigned to a task by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is zero or
    /// negative.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value <= 0 {
            return Err(TaskDomainError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying key.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TaskId {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for i64 {
    fn from(id: TaskId) -> Self {
        id.value()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistence state of a task's identity.
///
/// A task only receives a [`TaskId`] once the entity store has accepted it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum TaskIdentity {
    /// Not yet written to the entity store.
    #[default]
    Unsaved,
    /// Persisted under the given key.
    Saved(TaskId),
}

impl TaskIdentity {
    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(self) -> Option<TaskId> {
        match self {
            Self::Unsaved => None,
            Self::Saved(id) => Some(id),
        }
    }

    /// Returns `true` when the task has been persisted.
    #[must_use]
    pub const fn is_saved(self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

impl From<TaskId> for TaskIdentity {
    fn from(id: TaskId) -> Self {
        Self::Saved(id)
    }
}
