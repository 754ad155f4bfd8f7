#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # Todo
//!
//! A personal task tracker backed by a single JSON file.
//!
//! This crate provides:
//! - A self-validating `Task` value with recurrence date arithmetic
//! - A `TaskStore` that filters, sorts, searches and mutates tasks,
//!   rewriting the whole file after every change
//! - Bulk field validation and `DD-MMM` due-date helpers for boundary code
//! - Terminal UI helpers used by the `todo` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use todo::{NewTask, StoreConfig, TaskPriority, TaskStore};
//!
//! let mut store = TaskStore::open(&StoreConfig::new("tasks.json"));
//! let task = store.add(NewTask {
//!     title: "Buy groceries".to_string(),
//!     priority: TaskPriority::High,
//!     ..NewTask::default()
//! })?;
//! store.toggle(task.id())?;
//! # Ok::<(), todo::TodoError>(())
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Calendar helpers
pub mod dates;

// Bulk field validation
pub mod validation;

// Storage layer
pub mod storage;

// Store configuration
pub mod config;

// Task store
pub mod domain;

// Terminal UI helpers
pub mod ui;

pub use config::StoreConfig;
pub use domain::{SortKey, TaskStore};
pub use entities::{NewTask, Recurrence, Task, TaskPriority, TaskStatus, TaskUpdate};
pub use errors::{TodoError, TodoResult, ValidationError};
pub use storage::{FileStorage, MemoryStorage, Storage};
