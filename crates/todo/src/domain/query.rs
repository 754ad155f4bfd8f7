//! Filtering, sorting and search over tasks.

use crate::entities::{Task, TaskPriority, TaskStatus};
use crate::errors::TodoError;

/// Ordering for listed tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Earliest due date first, undated tasks last
    DueDate,
    /// High, then medium, then low
    Priority,
    /// Ascending ID
    Id,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DueDate => write!(f, "due-date"),
            Self::Priority => write!(f, "priority"),
            Self::Id => write!(f, "id"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "due-date" | "due_date" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "id" => Ok(Self::Id),
            _ => Err(TodoError::InvalidSortKey { key: s.to_string() }),
        }
    }
}

pub(crate) fn matches_filters(
    task: &Task,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> bool {
    status.map_or(true, |s| task.status() == s) && priority.map_or(true, |p| task.priority() == p)
}

/// Stable sort, so equal keys keep store order
pub(crate) fn sort_tasks(tasks: &mut [&Task], key: SortKey) {
    match key {
        SortKey::DueDate => tasks.sort_by_key(|t| (t.due_date().is_none(), t.due_date())),
        SortKey::Priority => tasks.sort_by_key(|t| t.priority().rank()),
        SortKey::Id => tasks.sort_by_key(|t| t.id()),
    }
}

/// `needle` must already be lowercase
pub(crate) fn matches_query(task: &Task, needle: &str) -> bool {
    task.title().to_lowercase().contains(needle)
        || task.description().to_lowercase().contains(needle)
        || task.tags().iter().any(|tag| tag.to_lowercase().contains(needle))
}
