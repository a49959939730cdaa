//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task identifier is not a positive surrogate key.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),
}

/// Error returned while parsing persisted view selection values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseSelectionError {
    /// Name of the selection being parsed.
    pub kind: &'static str,
    /// Raw value that failed to parse.
    pub value: String,
}

impl ParseSelectionError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
