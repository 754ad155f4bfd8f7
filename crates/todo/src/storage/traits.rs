//! Storage trait definitions.

use crate::entities::Task;
use crate::errors::TodoResult;

/// Whole-collection persistence for a task store.
///
/// There is no incremental API: every save replaces everything previously
/// stored with the given tasks, in the given order.
pub trait Storage: Send + Sync {
    /// Get storage type identifier
    fn storage_type(&self) -> &'static str;

    /// Load every stored task; an absent store yields an empty list
    fn load_tasks(&self) -> TodoResult<Vec<Task>>;

    /// Replace the stored tasks
    fn save_tasks(&self, tasks: &[Task]) -> TodoResult<()>;
}
