//! Error types for the todo crate.

use thiserror::Error;

/// Errors raised by task construction, the store and its storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    // Field errors
    #[error("Task ID must be a positive integer, got {id}")]
    InvalidId { id: u32 },

    #[error("Title is required and cannot be empty")]
    EmptyTitle,

    #[error("Title cannot exceed {max} characters (got {length})")]
    TitleTooLong { length: usize, max: usize },

    #[error("Description cannot exceed {max} characters (got {length})")]
    DescriptionTooLong { length: usize, max: usize },

    #[error("Status must be 'pending' or 'complete', got '{status}'")]
    InvalidStatus { status: String },

    #[error("Priority must be 'high', 'medium', or 'low', got '{priority}'")]
    InvalidPriority { priority: String },

    #[error("Recurrence must be 'daily', 'weekly', 'monthly', or 'none', got '{recurrence}'")]
    InvalidRecurrence { recurrence: String },

    #[error("A task cannot have more than {max} tags (got {count})")]
    TooManyTags { count: usize, max: usize },

    #[error("Tags cannot be empty")]
    EmptyTag,

    #[error("Tag '{tag}' exceeds {max} characters")]
    TagTooLong { tag: String, max: usize },

    #[error(
        "Tag '{tag}' contains invalid character '{character}'. Tags must be alphanumeric with optional hyphens or underscores"
    )]
    InvalidTagCharacter { tag: String, character: char },

    #[error("No task IDs left: ID {max} is already in use")]
    IdsExhausted { max: u32 },

    // Query errors
    #[error("Sort key must be 'due-date', 'priority', or 'id', got '{key}'")]
    InvalidSortKey { key: String },

    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    // Storage errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },
}

impl From<std::io::Error> for TodoError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for todo operations
pub type TodoResult<T> = Result<T, TodoError>;

/// One violated rule category found by bulk pre-validation.
///
/// Unlike [`TodoError`], these never stop at the first problem: a single
/// validation pass yields at most one of each.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    #[error("Title is required and cannot exceed 200 characters")]
    Title,

    #[error("Description cannot exceed 1000 characters")]
    Description,

    #[error("Status must be 'pending' or 'complete'")]
    Status,

    #[error("Priority must be 'high', 'medium', or 'low'")]
    Priority,

    #[error(
        "Tags must be alphanumeric with optional hyphens/underscores, max 50 chars each, and max 10 tags total"
    )]
    Tags,

    #[error("Due date must be in DD-MMM format (e.g., 05-Jan)")]
    DueDate,

    #[error("Recurrence must be 'daily', 'weekly', 'monthly', or 'none'")]
    Recurrence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TodoError::TitleTooLong {
            length: 201,
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "Title cannot exceed 200 characters (got 201)"
        );
    }

    #[test]
    fn test_tag_character_error_names_tag_and_character() {
        let err = TodoError::InvalidTagCharacter {
            tag: "bad tag".to_string(),
            character: ' ',
        };
        let message = err.to_string();
        assert!(message.contains("'bad tag'"));
        assert!(message.contains("' '"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let todo_err: TodoError = io_err.into();
        assert!(matches!(todo_err, TodoError::StorageError { .. }));
    }

    #[test]
    fn test_validation_error_messages() {
        assert!(ValidationError::DueDate.to_string().contains("DD-MMM"));
        assert!(ValidationError::Tags.to_string().contains("max 10 tags"));
    }
}
