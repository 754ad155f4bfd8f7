//! Bulk pre-validation of raw task fields.
//!
//! Boundary code runs this before calling into the store so a user sees every
//! problem at once. The store still validates on its own; this pass only
//! improves the report.

use crate::dates;
use crate::entities::{
    validate_description, validate_tags, validate_title, Recurrence, Task, TaskPriority,
    TaskStatus,
};
use crate::errors::ValidationError;

/// Raw, unparsed field values as typed by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFieldsInput {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub tags: Vec<String>,
    /// Due date in `DD-MMM` form; `None` when not supplied
    pub due_date: Option<String>,
    pub recurrence: String,
}

impl Default for TaskFieldsInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::default().to_string(),
            priority: TaskPriority::default().to_string(),
            tags: Vec::new(),
            due_date: None,
            recurrence: Recurrence::default().to_string(),
        }
    }
}

impl TaskFieldsInput {
    /// Current values of an existing task, used as the base for an update
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_string(),
            description: task.description().to_string(),
            status: task.status().to_string(),
            priority: task.priority().to_string(),
            tags: task.tags().to_vec(),
            due_date: None,
            recurrence: task.recurrence().to_string(),
        }
    }
}

/// Check every field independently and collect one error per violated rule
pub fn validate_task_fields(input: &TaskFieldsInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if validate_title(&input.title).is_err() {
        errors.push(ValidationError::Title);
    }
    if validate_description(&input.description).is_err() {
        errors.push(ValidationError::Description);
    }
    if input.status.parse::<TaskStatus>().is_err() {
        errors.push(ValidationError::Status);
    }
    if input.priority.parse::<TaskPriority>().is_err() {
        errors.push(ValidationError::Priority);
    }
    if validate_tags(&input.tags).is_err() {
        errors.push(ValidationError::Tags);
    }
    if let Some(due_date) = input.due_date.as_deref() {
        if !due_date.is_empty() && dates::split_day_month(due_date).is_err() {
            errors.push(ValidationError::DueDate);
        }
    }
    if input.recurrence.parse::<Recurrence>().is_err() {
        errors.push(ValidationError::Recurrence);
    }

    errors
}

/// Split comma-separated tag text, dropping blanks
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewTask;

    fn valid() -> TaskFieldsInput {
        TaskFieldsInput {
            title: "Buy groceries".to_string(),
            ..TaskFieldsInput::default()
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(validate_task_fields(&valid()).is_empty());

        let full = TaskFieldsInput {
            description: "Milk, bread".to_string(),
            status: "complete".to_string(),
            priority: "high".to_string(),
            tags: vec!["shopping".to_string()],
            due_date: Some("05-Jan".to_string()),
            recurrence: "weekly".to_string(),
            ..valid()
        };
        assert!(validate_task_fields(&full).is_empty());
    }

    #[test]
    fn test_collects_every_violation() {
        let input = TaskFieldsInput {
            title: String::new(),
            description: "x".repeat(1001),
            status: "done".to_string(),
            priority: "urgent".to_string(),
            tags: vec!["bad tag".to_string()],
            due_date: Some("2023-01-05".to_string()),
            recurrence: "yearly".to_string(),
        };

        assert_eq!(
            validate_task_fields(&input),
            vec![
                ValidationError::Title,
                ValidationError::Description,
                ValidationError::Status,
                ValidationError::Priority,
                ValidationError::Tags,
                ValidationError::DueDate,
                ValidationError::Recurrence,
            ]
        );
    }

    #[test]
    fn test_one_error_per_category() {
        let input = TaskFieldsInput {
            tags: vec!["a b".to_string(), "c!d".to_string()],
            ..valid()
        };
        assert_eq!(validate_task_fields(&input), vec![ValidationError::Tags]);
    }

    #[test]
    fn test_impossible_day_month_rejected() {
        let input = TaskFieldsInput {
            due_date: Some("31-Apr".to_string()),
            ..valid()
        };
        assert_eq!(validate_task_fields(&input), vec![ValidationError::DueDate]);
    }

    #[test]
    fn test_from_task_round_trips_as_valid() {
        let task = Task::new(
            1,
            NewTask {
                tags: vec!["work".to_string()],
                ..NewTask::titled("Finish report")
            },
        )
        .unwrap();
        let input = TaskFieldsInput::from_task(&task);
        assert_eq!(input.title, "Finish report");
        assert_eq!(input.status, "pending");
        assert!(validate_task_fields(&input).is_empty());
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(
            parse_tag_list("shopping, urgent,,  "),
            vec!["shopping".to_string(), "urgent".to_string()]
        );
        assert!(parse_tag_list("").is_empty());
    }
}
