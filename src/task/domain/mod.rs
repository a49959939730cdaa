//! Domain model for personal task management.
//!
//! Tasks, their manual ordering entries, the live view selection, and the
//! statistics derived from them. Nothing here touches storage or the runtime.

mod error;
mod ids;
mod order;
mod stats;
mod task;
mod view;

pub use error::{ParseSelectionError, TaskDomainError};
pub use ids::{TaskId, TaskIdentity};
pub use order::{OrderEntry, relocate};
pub use stats::TaskStatistics;
pub use task::{PersistedTaskData, Task, TaskPriority, TaskTitle};
pub use view::{SortKey, TaskFilter, ViewSelection};
