//! Task list service configuration.

use crate::task::domain::ViewSelection;
use std::time::Duration;

/// Default delay before an optimistic update stops masking the store.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Tunables for [`super::TaskListService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListConfig {
    settle_delay: Duration,
    initial_selection: ViewSelection,
}

impl TaskListConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long a pending update may mask the stored task.
    #[must_use]
    pub const fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Sets the selection the view starts with, for example one restored by
    /// a settings store.
    #[must_use]
    pub fn with_initial_selection(mut self, selection: ViewSelection) -> Self {
        self.initial_selection = selection;
        self
    }

    /// Returns the settle delay.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Returns the initial view selection.
    #[must_use]
    pub const fn initial_selection(&self) -> &ViewSelection {
        &self.initial_selection
    }
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            initial_selection: ViewSelection::default(),
        }
    }
}
