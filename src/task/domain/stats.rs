//! Aggregate counts over the task list.

use super::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counts derived from the full and completed task snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// Number of tasks in the store.
    pub total_tasks: usize,
    /// Number of completed tasks.
    pub completed_tasks: usize,
    /// `total_tasks - completed_tasks`.
    pub pending_tasks: usize,
    /// Whether any task carries a due date.
    pub has_due_dates: bool,
    /// Whether any pending task is due strictly before today.
    pub has_overdue: bool,
}

impl TaskStatistics {
    /// Derives statistics from the full snapshot and its completed subset.
    #[must_use]
    pub fn from_snapshots(all: &[Task], completed: &[Task], today: NaiveDate) -> Self {
        let total_tasks = all.len();
        let completed_tasks = completed.len();
        Self {
            total_tasks,
            completed_tasks,
            pending_tasks: total_tasks.saturating_sub(completed_tasks),
            has_due_dates: all.iter().any(|task| task.due_date().is_some()),
            has_overdue: all.iter().any(|task| task.is_overdue(today)),
        }
    }

    /// Returns `completed / total` in `0.0..=1.0`, or `0.0` for an empty list.
    ///
    /// Counts too large for exact conversion are scaled down together, so the
    /// ratio stays approximately right.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "completion ratio is inherently fractional"
    )]
    pub fn completion_percentage(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        let shift = usize::BITS
            .saturating_sub(self.total_tasks.leading_zeros())
            .saturating_sub(u32::BITS);
        let completed = u32::try_from(self.completed_tasks >> shift).unwrap_or(u32::MAX);
        let total = u32::try_from(self.total_tasks >> shift).unwrap_or(u32::MAX);
        f64::from(completed) / f64::from(total)
    }
}
