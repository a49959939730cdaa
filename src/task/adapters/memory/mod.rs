//! In-memory adapter implementations.
//!
//! Both stores publish a fresh snapshot on every successful write, while
//! still holding their write lock, so subscribers observe writes in order.

mod order;
mod task;

pub use order::InMemoryTaskOrderRepository;
pub use task::InMemoryTaskRepository;

use crate::task::ports::TaskRepositoryError;

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}
