//! Application services for the task list.
//!
//! [`TaskListService`] owns the derived view and the command surface,
//! [`TaskEditor`] drives single-task editing on top of it.

mod cache;
mod config;
mod editor;
mod ordering;
mod samples;
mod statistics;
mod task_list;

pub use cache::OptimisticCache;
pub use config::{DEFAULT_SETTLE_DELAY, TaskListConfig};
pub use editor::TaskEditor;
pub use ordering::{apply_manual_order, apply_sort_key, arrange_tasks};
pub use samples::seed_sample_tasks;
pub use statistics::StatisticsAggregator;
pub use task_list::{TaskListError, TaskListResult, TaskListService};
