//! Taskdeck: reactive core of a single-screen personal task manager.
//!
//! This crate keeps a list of tasks and a user-defined manual ordering in
//! two stores, derives the displayed list and summary statistics from them,
//! and exposes the commands the presentation layer issues.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task, ordering and view-selection types
//! - **Ports**: Abstract store traits publishing change streams
//! - **Adapters**: In-memory store implementations
//! - **Services**: Ordering engine, statistics and the command surface
//!
//! # Modules
//!
//! - [`task`]: Task storage, ordering, statistics and commands

pub mod task;
