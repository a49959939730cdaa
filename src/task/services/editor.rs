//! Single-task editing: load, change fields, validate and save.

use super::{TaskListResult, TaskListService};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskPriority, TaskTitle},
    ports::{TaskOrderRepository, TaskRepository},
};
use chrono::NaiveDate;
use mockable::Clock;

/// Editable draft of one task.
///
/// A fresh editor describes a new task; after [`Self::load`] it edits the
/// loaded one. Saving inserts or updates accordingly.
pub struct TaskEditor<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service: TaskListService<T, O, C>,
    loaded: Option<Task>,
    title: String,
    description: String,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    is_completed: bool,
}

impl<T, O, C> TaskEditor<T, O, C>
where
    T: TaskRepository + 'static,
    O: TaskOrderRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an editor for a new task.
    #[must_use]
    pub fn new(service: TaskListService<T, O, C>) -> Self {
        Self {
            service,
            loaded: None,
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::default(),
            due_date: None,
            is_completed: false,
        }
    }

    /// Loads a stored task into the draft.
    ///
    /// Returns `false` and leaves the editor in new-task state when no task
    /// has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskListError::Repository`] when the lookup fails.
    pub async fn load(&mut self, id: TaskId) -> TaskListResult<bool> {
        let Some(task) = self.service.find_task(id).await? else {
            return Ok(false);
        };
        self.title = task.title().as_str().to_owned();
        self.description = task.description().to_owned();
        self.priority = task.priority();
        self.due_date = task.due_date();
        self.is_completed = task.is_completed();
        self.loaded = Some(task);
        Ok(true)
    }

    /// Returns the task being edited, if one was loaded or saved.
    #[must_use]
    pub const fn loaded(&self) -> Option<&Task> {
        self.loaded.as_ref()
    }

    /// Returns the draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the draft description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the draft priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the draft due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the draft completion flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Replaces the draft title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the draft description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the draft priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Replaces the draft due date.
    pub const fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    /// Flips the draft completion flag.
    pub const fn toggle_completion(&mut self) {
        self.is_completed = !self.is_completed;
    }

    /// Checks the draft without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<TaskTitle, TaskDomainError> {
        TaskTitle::new(self.title.as_str())
    }

    /// Validates and persists the draft.
    ///
    /// A loaded task is updated in place; otherwise a new task is inserted
    /// and appended to the manual order.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskListError::Domain`] for a blank title, before any
    /// write, or [`super::TaskListError::Repository`] when a write fails.
    pub async fn save(&mut self) -> TaskListResult<TaskId> {
        let title = self.validate()?;
        let base = match &self.loaded {
            Some(task) => task.clone().with_title(title),
            None => Task::new(title, &**self.service.clock()),
        };
        let draft = base
            .with_description(self.description.as_str())
            .with_priority(self.priority)
            .with_due_date(self.due_date)
            .with_completed(self.is_completed);

        let id = match draft.id() {
            Some(id) => {
                self.service.update_task(&draft).await?;
                id
            }
            None => self.service.insert_task(&draft).await?,
        };
        self.loaded = Some(draft.with_id(id));
        Ok(id)
    }

    /// Deletes the loaded task. Does nothing for a new task.
    ///
    /// Returns `true` when a task was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskListError::Repository`] when a write fails.
    pub async fn delete(&mut self) -> TaskListResult<bool> {
        let Some(task) = self.loaded.take() else {
            return Ok(false);
        };
        self.service.delete_task(&task).await?;
        Ok(true)
    }
}
