//! Personal task list with manual ordering and optimistic updates.
//!
//! Stored tasks, stored manual positions, the live view selection and a
//! cache of pending writes are reconciled into one ordered list. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
