//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::task::{
    adapters::memory::{InMemoryTaskOrderRepository, InMemoryTaskRepository},
    domain::{Task, TaskId, TaskTitle},
    services::{TaskListConfig, TaskListResult, TaskListService},
};

/// Service type used by the integration tests.
pub type TestService =
    TaskListService<InMemoryTaskRepository, InMemoryTaskOrderRepository, DefaultClock>;

/// Service together with direct handles on both stores.
pub struct Harness {
    /// Service under test.
    pub service: TestService,
    /// Entity store shared with the service.
    pub tasks: InMemoryTaskRepository,
    /// Order store shared with the service.
    pub order: InMemoryTaskOrderRepository,
}

/// Provides a fresh harness for each test.
///
/// # Errors
///
/// Returns an error when requested outside a Tokio runtime.
#[fixture]
pub fn harness() -> TaskListResult<Harness> {
    let tasks = InMemoryTaskRepository::new();
    let order = InMemoryTaskOrderRepository::new();
    let service = TaskListService::start(
        Arc::new(tasks.clone()),
        Arc::new(order.clone()),
        Arc::new(DefaultClock),
        TaskListConfig::default(),
    )?;
    Ok(Harness {
        service,
        tasks,
        order,
    })
}

/// Builds an unsaved task with the given title.
///
/// # Errors
///
/// Returns an error if the title is blank.
pub fn new_task(title: &str) -> Result<Task, eyre::Report> {
    Ok(Task::new(TaskTitle::new(title)?, &DefaultClock))
}

/// Inserts one task per title and returns their identifiers.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub async fn insert_all(
    service: &TestService,
    titles: &[&str],
) -> Result<Vec<TaskId>, eyre::Report> {
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
        ids.push(service.insert_task(&new_task(title)?).await?);
    }
    Ok(ids)
}

/// Loads a stored task or fails.
///
/// # Errors
///
/// Returns an error if the lookup fails or the task is missing.
pub async fn stored(service: &TestService, id: TaskId) -> Result<Task, eyre::Report> {
    service
        .find_task(id)
        .await?
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))
}

/// Titles of the currently displayed tasks.
#[must_use]
pub fn displayed_titles(service: &TestService) -> Vec<String> {
    service
        .current_tasks()
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
