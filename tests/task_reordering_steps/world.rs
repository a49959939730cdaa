//! Shared world state for reordering BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::{InMemoryTaskOrderRepository, InMemoryTaskRepository},
    services::{TaskListConfig, TaskListService},
};

/// Service type used by the BDD world.
pub type TestTaskListService =
    TaskListService<InMemoryTaskRepository, InMemoryTaskOrderRepository, DefaultClock>;

/// Scenario world for reordering behaviour tests.
///
/// The service is started by the first given step so that it is created
/// inside the scenario's runtime.
#[derive(Default)]
pub struct ReorderWorld {
    pub service: Option<TestTaskListService>,
}

impl ReorderWorld {
    /// Starts the service over empty in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns an error when no Tokio runtime is running.
    pub fn start(&mut self) -> Result<&TestTaskListService, eyre::Report> {
        let service = TaskListService::start(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryTaskOrderRepository::new()),
            Arc::new(DefaultClock),
            TaskListConfig::default(),
        )
        .wrap_err("start task list service")?;
        Ok(self.service.insert(service))
    }

    /// Returns the running service.
    ///
    /// # Errors
    ///
    /// Returns an error when no given step has started it.
    pub fn service(&self) -> Result<&TestTaskListService, eyre::Report> {
        self.service
            .as_ref()
            .ok_or_else(|| eyre::eyre!("task list service not started in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReorderWorld {
    ReorderWorld::default()
}

/// Splits a comma-separated list of titles.
pub fn parse_titles(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
