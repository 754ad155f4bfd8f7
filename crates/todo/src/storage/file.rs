//! File-based storage implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::traits::Storage;
use crate::entities::Task;
use crate::errors::{TodoError, TodoResult};

/// Store file contents: `{ "tasks": [ ... ] }`
#[derive(Debug, Default, Deserialize)]
struct TaskDocument {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
struct TaskDocumentRef<'a> {
    tasks: &'a [Task],
}

/// JSON file storage, rewritten in full on every save
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Path to the store file
    path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage instance
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> TodoResult<TaskDocument> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let document: TaskDocument = serde_json::from_str(&content)?;
                Ok(document)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TaskDocument::default()),
            Err(e) => Err(TodoError::FileReadError {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl Storage for FileStorage {
    fn storage_type(&self) -> &'static str {
        "file"
    }

    fn load_tasks(&self) -> TodoResult<Vec<Task>> {
        let document = self.read_document()?;
        tracing::debug!(
            "Read {} task(s) from {}",
            document.tasks.len(),
            self.path.display()
        );
        Ok(document.tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> TodoResult<()> {
        // Ensure directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| TodoError::FileWriteError {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(&TaskDocumentRef { tasks })?;
        fs::write(&self.path, content).map_err(|e| TodoError::FileWriteError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!("Wrote {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
