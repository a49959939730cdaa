//! Demonstration data for an empty store.

use super::{TaskListResult, TaskListService};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskPriority, TaskTitle},
    ports::{TaskOrderRepository, TaskRepository},
};
use chrono::{Days, NaiveDate};
use mockable::Clock;

/// Inserts four sample tasks dated relative to today and returns their
/// identifiers in insertion order.
///
/// # Errors
///
/// Returns [`super::TaskListError::Repository`] when a write fails.
pub async fn seed_sample_tasks<T, O, C>(
    service: &TaskListService<T, O, C>,
) -> TaskListResult<Vec<TaskId>>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let today = service.today();
    let samples = sample_tasks(today, &**service.clock())?;
    let mut ids = Vec::with_capacity(samples.len());
    for task in &samples {
        ids.push(service.insert_task(task).await?);
    }
    Ok(ids)
}

fn sample_tasks(today: NaiveDate, clock: &impl Clock) -> Result<Vec<Task>, TaskDomainError> {
    let in_days = |days: u64| today.checked_add_days(Days::new(days));
    Ok(vec![
        Task::new(TaskTitle::new("Complete project documentation")?, clock)
            .with_description("Write comprehensive documentation for the task manager app")
            .with_priority(TaskPriority::High)
            .with_due_date(in_days(2)),
        Task::new(TaskTitle::new("Buy groceries")?, clock)
            .with_description("Milk, eggs, bread, fruits")
            .with_priority(TaskPriority::Medium)
            .with_due_date(in_days(1)),
        Task::new(TaskTitle::new("Call mom")?, clock)
            .with_description("Catch up and ask about the weekend plans")
            .with_priority(TaskPriority::Low)
            .with_due_date(Some(today)),
        Task::new(TaskTitle::new("Exercise")?, clock)
            .with_description("Go for a 30-minute jog")
            .with_priority(TaskPriority::Medium)
            .with_completed(true),
    ])
}
