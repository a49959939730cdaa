//! Shared fixtures and repository doubles for task tests.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::task::{
    adapters::memory::{InMemoryTaskOrderRepository, InMemoryTaskRepository},
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStream},
    services::{TaskListConfig, TaskListService},
};

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at_noon(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid fixed instant");
        Self(instant)
    }

    pub fn today(&self) -> NaiveDate {
        self.local().date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn clock() -> FixedClock {
    FixedClock::at_noon(2026, 3, 15)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn id(value: i64) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Builds a persisted pending task with medium priority and no due date.
pub fn saved(value: i64, title: &str) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: id(value),
        title: TaskTitle::new(title).expect("valid title"),
        description: String::new(),
        priority: TaskPriority::Medium,
        due_date: None,
        is_completed: false,
        created_date: date(2026, 3, 1),
    })
}

/// Builds an unsaved pending task.
pub fn unsaved(title: &str) -> Task {
    Task::new(TaskTitle::new(title).expect("valid title"), &clock())
}

pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

pub type MemoryService =
    TaskListService<InMemoryTaskRepository, InMemoryTaskOrderRepository, FixedClock>;

pub fn memory_service() -> (MemoryService, InMemoryTaskRepository, InMemoryTaskOrderRepository) {
    let tasks = InMemoryTaskRepository::new();
    let order = InMemoryTaskOrderRepository::new();
    let service = TaskListService::start(
        Arc::new(tasks.clone()),
        Arc::new(order.clone()),
        Arc::new(clock()),
        TaskListConfig::default(),
    )
    .expect("service starts inside a runtime");
    (service, tasks, order)
}

/// How [`InterceptingTaskRepository`] treats updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateBehaviour {
    /// Block until [`InterceptingTaskRepository::release`] is called.
    Gated,
    /// Fail every update with a persistence error.
    Failing,
}

/// In-memory repository whose updates can be held back or made to fail.
pub struct InterceptingTaskRepository {
    inner: InMemoryTaskRepository,
    behaviour: UpdateBehaviour,
    entered: Notify,
    released: Notify,
}

impl InterceptingTaskRepository {
    pub fn new(behaviour: UpdateBehaviour) -> Self {
        Self {
            inner: InMemoryTaskRepository::new(),
            behaviour,
            entered: Notify::new(),
            released: Notify::new(),
        }
    }

    /// Waits until an update call has started.
    pub async fn update_started(&self) {
        self.entered.notified().await;
    }

    /// Lets one held-back update proceed.
    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[async_trait]
impl TaskRepository for InterceptingTaskRepository {
    fn observe_all(&self) -> TaskStream {
        self.inner.observe_all()
    }

    fn observe_by_completion(&self, is_completed: bool) -> TaskStream {
        self.inner.observe_by_completion(is_completed)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskId> {
        self.inner.insert(task).await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.entered.notify_one();
        match self.behaviour {
            UpdateBehaviour::Gated => {
                self.released.notified().await;
                self.inner.update(task).await
            }
            UpdateBehaviour::Failing => Err(TaskRepositoryError::persistence(
                std::io::Error::other("disk full"),
            )),
        }
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }
}
