//! Persistence adapters for the task module.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory entity store
//! - [`memory::InMemoryTaskOrderRepository`]: thread-safe in-memory order store

pub mod memory;
