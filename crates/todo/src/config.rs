//! Store configuration.

use std::path::{Path, PathBuf};

/// Environment variable naming the store file
pub const STORE_PATH_ENV: &str = "TODO_FILE";

/// Store file used when nothing else is configured
pub const DEFAULT_STORE_FILE: &str = "tasks.json";

/// Explicit configuration handed to [`crate::TaskStore::open`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON store file
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Resolve from an explicit path, falling back to `TODO_FILE`, then
    /// `tasks.json` in the working directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var_os(STORE_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
        Self { path }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}
