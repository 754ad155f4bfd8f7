//! Core data structures for task tracking.

mod recurrence;
mod task;

pub use recurrence::Recurrence;
pub use task::{
    validate_description, validate_tag, validate_tags, validate_title, NewTask, Task,
    TaskPriority, TaskRecord, TaskStatus, TaskUpdate, MAX_DESCRIPTION_LEN, MAX_TAGS, MAX_TAG_LEN,
    MAX_TITLE_LEN,
};
