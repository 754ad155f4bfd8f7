//! In-process storage.

use std::sync::{Arc, Mutex};

use super::traits::Storage;
use crate::entities::Task;
use crate::errors::{TodoError, TodoResult};

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<Task>,
    saves: usize,
}

/// Storage kept in memory.
///
/// Clones share the same contents, so a caller can keep a handle and inspect
/// what a store has saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with previously saved tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState { tasks, saves: 0 })),
        }
    }

    /// Tasks as of the last save
    pub fn snapshot(&self) -> Vec<Task> {
        self.state
            .lock()
            .map(|state| state.tasks.clone())
            .unwrap_or_default()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.state.lock().map(|state| state.saves).unwrap_or(0)
    }
}

impl Storage for MemoryStorage {
    fn storage_type(&self) -> &'static str {
        "memory"
    }

    fn load_tasks(&self) -> TodoResult<Vec<Task>> {
        let state = self.state.lock().map_err(|e| TodoError::StorageError {
            reason: e.to_string(),
        })?;
        Ok(state.tasks.clone())
    }

    fn save_tasks(&self, tasks: &[Task]) -> TodoResult<()> {
        let mut state = self.state.lock().map_err(|e| TodoError::StorageError {
            reason: e.to_string(),
        })?;
        state.tasks = tasks.to_vec();
        state.saves += 1;
        Ok(())
    }
}
