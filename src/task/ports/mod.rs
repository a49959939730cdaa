//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.
//! Both stores publish full snapshots through `tokio::sync::watch` channels:
//! a receiver always holds the current value and is notified on every write.

pub mod order;
pub mod repository;

pub use order::{OrderStream, TaskOrderRepository};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStream};
