//! Task entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Recurrence;
use crate::dates;
use crate::errors::{TodoError, TodoResult};

/// Maximum title length in characters, measured after trimming
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Maximum number of tags on one task
pub const MAX_TAGS: usize = 10;

/// Maximum length of a single tag in characters
pub const MAX_TAG_LEN: usize = 50;

/// Task status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Complete,
}

impl TaskStatus {
    /// The opposite status
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Complete,
            Self::Complete => Self::Pending,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "complete" => Ok(Self::Complete),
            _ => Err(TodoError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Task priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort rank, most urgent first
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(TodoError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Field values for a task that does not have an ID yet.
///
/// `created_at` is normally left empty and defaults to today; it is only
/// supplied when restoring previously recorded state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tags: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Recurrence,
    pub created_at: Option<NaiveDate>,
}

impl NewTask {
    /// Fields with the given title and every other value defaulted
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update: `None` leaves the current value in place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Option<Recurrence>,
}

impl TaskUpdate {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
            && self.due_date.is_none()
            && self.recurrence.is_none()
    }
}

/// A single to-do item.
///
/// Fields are private: every instance has passed validation, and the only
/// in-place mutation is [`Task::toggle_status`], which cannot break an
/// invariant. Other changes go through [`Task::with_update`], which builds and
/// validates a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    id: u32,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    tags: Vec<String>,
    due_date: Option<NaiveDate>,
    recurrence: Recurrence,
    created_at: Option<NaiveDate>,
}

impl Task {
    /// Validate `fields` and build a task with the given ID
    pub fn new(id: u32, fields: NewTask) -> TodoResult<Self> {
        let task = Self {
            id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            tags: fields.tags,
            due_date: fields.due_date,
            recurrence: fields.recurrence,
            created_at: Some(fields.created_at.unwrap_or_else(dates::today)),
        };
        task.validate()?;
        Ok(task)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    pub fn created_at(&self) -> Option<NaiveDate> {
        self.created_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Check if the task repeats once completed
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Flip pending <-> complete
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }

    /// Next occurrence date counted from `from`, `None` if not recurring
    pub fn next_occurrence_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.recurrence.next_after(from)
    }

    /// Next occurrence date counted from today
    pub fn next_occurrence(&self) -> Option<NaiveDate> {
        self.next_occurrence_date(dates::today())
    }

    /// Build the pending successor of a recurring task.
    ///
    /// The successor copies title, description, priority, tags and recurrence;
    /// its due date is the next occurrence counted from `today`.
    pub fn successor(&self, id: u32, today: NaiveDate) -> TodoResult<Option<Self>> {
        if !self.is_recurring() {
            return Ok(None);
        }

        Self::new(
            id,
            NewTask {
                title: self.title.clone(),
                description: self.description.clone(),
                status: TaskStatus::Pending,
                priority: self.priority,
                tags: self.tags.clone(),
                due_date: self.next_occurrence_date(today),
                recurrence: self.recurrence,
                created_at: Some(today),
            },
        )
        .map(Some)
    }

    /// A validated copy with the supplied fields replaced.
    ///
    /// `self` is left untouched if the result would violate an invariant.
    pub fn with_update(&self, update: &TaskUpdate) -> TodoResult<Self> {
        let candidate = Self {
            id: self.id,
            title: update.title.clone().unwrap_or_else(|| self.title.clone()),
            description: update
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            status: update.status.unwrap_or(self.status),
            priority: update.priority.unwrap_or(self.priority),
            tags: update.tags.clone().unwrap_or_else(|| self.tags.clone()),
            due_date: update.due_date.or(self.due_date),
            recurrence: update.recurrence.unwrap_or(self.recurrence),
            created_at: self.created_at,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    fn validate(&self) -> TodoResult<()> {
        if self.id == 0 {
            return Err(TodoError::InvalidId { id: self.id });
        }
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_tags(&self.tags)
    }
}

/// Title must be 1-200 characters once surrounding whitespace is removed
pub fn validate_title(title: &str) -> TodoResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::EmptyTitle);
    }

    let length = trimmed.chars().count();
    if length > MAX_TITLE_LEN {
        return Err(TodoError::TitleTooLong {
            length,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(())
}

pub fn validate_description(description: &str) -> TodoResult<()> {
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_LEN {
        return Err(TodoError::DescriptionTooLong {
            length,
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

/// At most 10 tags, each valid on its own
pub fn validate_tags(tags: &[String]) -> TodoResult<()> {
    if tags.len() > MAX_TAGS {
        return Err(TodoError::TooManyTags {
            count: tags.len(),
            max: MAX_TAGS,
        });
    }
    tags.iter().try_for_each(|tag| validate_tag(tag))
}

/// A tag is 1-50 characters of `[A-Za-z0-9_-]`
pub fn validate_tag(tag: &str) -> TodoResult<()> {
    if tag.is_empty() {
        return Err(TodoError::EmptyTag);
    }
    if tag.chars().count() > MAX_TAG_LEN {
        return Err(TodoError::TagTooLong {
            tag: tag.to_string(),
            max: MAX_TAG_LEN,
        });
    }
    if let Some(character) = tag
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(TodoError::InvalidTagCharacter {
            tag: tag.to_string(),
            character,
        });
    }
    Ok(())
}

/// On-disk shape of a task inside the store file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TodoError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        // A missing creation date stays missing on reload
        let task = Self {
            id: record.id,
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            tags: record.tags,
            due_date: record.due_date,
            recurrence: record.recurrence,
            created_at: record.created_at,
        };
        task.validate()?;
        Ok(task)
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            tags: task.tags,
            due_date: task.due_date,
            recurrence: task.recurrence,
            created_at: task.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn recurring(recurrence: Recurrence) -> Task {
        Task::new(
            1,
            NewTask {
                recurrence,
                ..NewTask::titled("Water plants")
            },
        )
        .unwrap()
    }

    #[test]
    fn test_task_new_defaults() {
        let task = Task::new(1, NewTask::titled("Test Task")).unwrap();
        assert_eq!(task.id(), 1);
        assert_eq!(task.title(), "Test Task");
        assert_eq!(task.description(), "");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.priority(), TaskPriority::Medium);
        assert!(task.tags().is_empty());
        assert_eq!(task.due_date(), None);
        assert_eq!(task.recurrence(), Recurrence::None);
        assert_eq!(task.created_at(), Some(dates::today()));
    }

    #[test]
    fn test_task_new_reads_back_every_field() {
        let fields = NewTask {
            title: "Buy groceries".to_string(),
            description: "Milk, bread, eggs".to_string(),
            status: TaskStatus::Complete,
            priority: TaskPriority::High,
            tags: vec!["shopping".to_string(), "urgent".to_string()],
            due_date: Some(ymd(2023, 1, 5)),
            recurrence: Recurrence::Weekly,
            created_at: Some(ymd(2022, 12, 31)),
        };
        let task = Task::new(7, fields.clone()).unwrap();

        assert_eq!(task.id(), 7);
        assert_eq!(task.title(), fields.title);
        assert_eq!(task.description(), fields.description);
        assert_eq!(task.status(), fields.status);
        assert_eq!(task.priority(), fields.priority);
        assert_eq!(task.tags(), fields.tags.as_slice());
        assert_eq!(task.due_date(), fields.due_date);
        assert_eq!(task.recurrence(), fields.recurrence);
        assert_eq!(task.created_at(), fields.created_at);
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(
            Task::new(1, NewTask::titled("")).unwrap_err(),
            TodoError::EmptyTitle
        );
        assert_eq!(
            Task::new(1, NewTask::titled("   ")).unwrap_err(),
            TodoError::EmptyTitle
        );
        assert!(Task::new(1, NewTask::titled("a".repeat(200))).is_ok());
        assert!(matches!(
            Task::new(1, NewTask::titled("a".repeat(201))),
            Err(TodoError::TitleTooLong { length: 201, .. })
        ));
    }

    #[test]
    fn test_description_validation() {
        let ok = NewTask {
            description: "d".repeat(1000),
            ..NewTask::titled("T")
        };
        assert!(Task::new(1, ok).is_ok());

        let too_long = NewTask {
            description: "d".repeat(1001),
            ..NewTask::titled("T")
        };
        assert!(matches!(
            Task::new(1, too_long),
            Err(TodoError::DescriptionTooLong { .. })
        ));
    }

    #[test]
    fn test_tag_validation() {
        let with_tags = |tags: Vec<&str>| NewTask {
            tags: tags.into_iter().map(String::from).collect(),
            ..NewTask::titled("T")
        };

        assert!(Task::new(1, with_tags(vec!["work", "home-office", "q_3"])).is_ok());
        assert!(matches!(
            Task::new(1, with_tags(vec!["a"; 11])),
            Err(TodoError::TooManyTags { count: 11, .. })
        ));
        assert_eq!(
            Task::new(1, with_tags(vec!["ok", "bad tag"])).unwrap_err(),
            TodoError::InvalidTagCharacter {
                tag: "bad tag".to_string(),
                character: ' ',
            }
        );
        let long_tag = "x".repeat(51);
        assert!(matches!(
            Task::new(1, with_tags(vec![long_tag.as_str()])),
            Err(TodoError::TagTooLong { .. })
        ));
        assert_eq!(
            Task::new(1, with_tags(vec![""])).unwrap_err(),
            TodoError::EmptyTag
        );
    }

    #[test]
    fn test_zero_id_rejected() {
        assert_eq!(
            Task::new(0, NewTask::titled("T")).unwrap_err(),
            TodoError::InvalidId { id: 0 }
        );
    }

    #[test]
    fn test_status_and_priority_parsing() {
        assert_eq!(
            "pending".parse::<TaskStatus>().unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(
            "Complete".parse::<TaskStatus>().unwrap(),
            TaskStatus::Complete
        );
        assert!("done".parse::<TaskStatus>().is_err());
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_toggle_status() {
        let mut task = Task::new(1, NewTask::titled("T")).unwrap();
        task.toggle_status();
        assert_eq!(task.status(), TaskStatus::Complete);
        task.toggle_status();
        assert_eq!(task.status(), TaskStatus::Pending);
    }

    #[test]
    fn test_next_occurrence_date() {
        let from = ymd(2023, 1, 15);
        assert_eq!(
            recurring(Recurrence::Daily).next_occurrence_date(from),
            Some(ymd(2023, 1, 16))
        );
        assert_eq!(
            recurring(Recurrence::Weekly).next_occurrence_date(from),
            Some(ymd(2023, 1, 22))
        );
        assert_eq!(
            recurring(Recurrence::Monthly).next_occurrence_date(from),
            Some(ymd(2023, 2, 15))
        );
        assert_eq!(
            recurring(Recurrence::Monthly).next_occurrence_date(ymd(2023, 1, 31)),
            Some(ymd(2023, 2, 28))
        );
        assert_eq!(
            recurring(Recurrence::Monthly).next_occurrence_date(ymd(2024, 2, 29)),
            Some(ymd(2024, 3, 29))
        );
        assert_eq!(recurring(Recurrence::None).next_occurrence_date(from), None);
        assert!(!recurring(Recurrence::None).is_recurring());
    }

    #[test]
    fn test_next_occurrence_counts_from_today() {
        let today = dates::today();
        assert_eq!(
            recurring(Recurrence::Weekly).next_occurrence(),
            today.checked_add_days(chrono::Days::new(7))
        );
        assert_eq!(
            recurring(Recurrence::Monthly).next_occurrence(),
            dates::add_one_month(today)
        );
        assert_eq!(recurring(Recurrence::None).next_occurrence(), None);
    }

    #[test]
    fn test_successor_copies_fields() {
        let today = ymd(2023, 3, 10);
        let original = Task::new(
            4,
            NewTask {
                description: "Every morning".to_string(),
                status: TaskStatus::Complete,
                priority: TaskPriority::Low,
                tags: vec!["garden".to_string()],
                due_date: Some(ymd(2023, 3, 1)),
                recurrence: Recurrence::Daily,
                ..NewTask::titled("Water plants")
            },
        )
        .unwrap();

        let next = original.successor(5, today).unwrap().unwrap();
        assert_eq!(next.id(), 5);
        assert_eq!(next.title(), original.title());
        assert_eq!(next.description(), original.description());
        assert_eq!(next.priority(), original.priority());
        assert_eq!(next.tags(), original.tags());
        assert_eq!(next.recurrence(), Recurrence::Daily);
        assert_eq!(next.status(), TaskStatus::Pending);
        assert_eq!(next.due_date(), Some(ymd(2023, 3, 11)));
        assert_eq!(next.created_at(), Some(today));

        let one_off = Task::new(6, NewTask::titled("Once")).unwrap();
        assert!(one_off.successor(7, today).unwrap().is_none());
    }

    #[test]
    fn test_with_update_replaces_only_supplied_fields() {
        let task = Task::new(
            1,
            NewTask {
                priority: TaskPriority::Low,
                ..NewTask::titled("Original")
            },
        )
        .unwrap();

        let updated = task
            .with_update(&TaskUpdate {
                title: Some("Updated".to_string()),
                ..TaskUpdate::default()
            })
            .unwrap();

        assert_eq!(updated.title(), "Updated");
        assert_eq!(updated.priority(), TaskPriority::Low);
        assert_eq!(updated.created_at(), task.created_at());
    }

    #[test]
    fn test_with_update_rejects_invalid_result() {
        let task = Task::new(1, NewTask::titled("Original")).unwrap();
        let result = task.with_update(&TaskUpdate {
            title: Some(String::new()),
            ..TaskUpdate::default()
        });

        assert_eq!(result.unwrap_err(), TodoError::EmptyTitle);
        assert_eq!(task.title(), "Original");
    }

    #[test]
    fn test_serde_format() {
        let task = Task::new(
            3,
            NewTask {
                due_date: Some(ymd(2023, 1, 5)),
                created_at: Some(ymd(2023, 1, 1)),
                ..NewTask::titled("Pay rent")
            },
        )
        .unwrap();

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["status"], "pending");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["recurrence"], "none");
        assert_eq!(value["due_date"], "2023-01-05");
        assert_eq!(value["created_at"], "2023-01-01");
    }

    #[test]
    fn test_deserialize_keeps_missing_created_at_and_validates() {
        let task: Task = serde_json::from_str(r#"{"id": 2, "title": "Old task"}"#).unwrap();
        assert_eq!(task.created_at(), None);
        assert_eq!(task.due_date(), None);

        let invalid = serde_json::from_str::<Task>(r#"{"id": 2, "title": ""}"#);
        assert!(invalid.is_err());

        let bad_enum = serde_json::from_str::<Task>(r#"{"id": 2, "title": "T", "priority": "urgent"}"#);
        assert!(bad_enum.is_err());
    }
}
