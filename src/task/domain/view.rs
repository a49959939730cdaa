//! Live view selection: status filter, sort key, manual mode and search.

use super::{ParseSelectionError, Task};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status-based subset selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Completed tasks only.
    Completed,
    /// Tasks still to do.
    Pending,
}

impl TaskFilter {
    /// Returns `true` when the task passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed(),
            Self::Pending => !task.is_completed(),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

impl TryFrom<&str> for TaskFilter {
    type Error = ParseSelectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(ParseSelectionError::new("task filter", value)),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Automatic ordering criterion, used only when manual ordering is off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Highest priority first.
    Priority,
    /// Earliest due date first, undated tasks last.
    #[default]
    DueDate,
    /// Case-insensitive title order.
    Alphabetical,
}

impl SortKey {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::DueDate => "due_date",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl TryFrom<&str> for SortKey {
    type Error = ParseSelectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "priority" => Ok(Self::Priority),
            "due_date" => Ok(Self::DueDate),
            "alphabetical" => Ok(Self::Alphabetical),
            _ => Err(ParseSelectionError::new("sort key", value)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the presentation layer selects about how the list is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
    /// Status filter.
    pub filter: TaskFilter,
    /// Automatic sort key, ignored while `manual_order` is set.
    pub sort_key: SortKey,
    /// Use persisted manual positions instead of `sort_key`.
    pub manual_order: bool,
    /// Free-text search over title and description.
    pub search: Option<String>,
}

impl ViewSelection {
    /// Returns the lowercase search needle, or `None` when the query is blank.
    #[must_use]
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns `true` when the task passes both the status filter and the
    /// search needle.
    #[must_use]
    pub fn admits(&self, task: &Task, needle: Option<&str>) -> bool {
        self.filter.matches(task) && needle.is_none_or(|query| task.matches_search(query))
    }
}
