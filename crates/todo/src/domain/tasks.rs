//! Task store.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use super::query::{matches_filters, matches_query, sort_tasks, SortKey};
use crate::config::StoreConfig;
use crate::dates;
use crate::entities::{NewTask, Task, TaskPriority, TaskStatus, TaskUpdate};
use crate::errors::{TodoError, TodoResult};
use crate::storage::{FileStorage, Storage};

/// In-memory task collection persisted through a [`Storage`].
///
/// Loading happens once, at construction. Every successful mutation
/// rewrites the whole collection before returning. Unknown IDs are a normal
/// `None`/`false` result, never an error.
pub struct TaskStore {
    storage: Box<dyn Storage>,
    tasks: BTreeMap<u32, Task>,
    next_id: Option<u32>,
    clock: fn() -> NaiveDate,
    load_error: Option<TodoError>,
    save_error: Option<TodoError>,
}

impl TaskStore {
    /// Open the JSON store file named by `config`
    pub fn open(config: &StoreConfig) -> Self {
        Self::with_storage(FileStorage::new(&config.path))
    }

    /// Load from any storage.
    ///
    /// An unreadable or corrupt store is not fatal: the problem is logged,
    /// kept for [`TaskStore::load_error`], and the store starts empty.
    pub fn with_storage(storage: impl Storage + 'static) -> Self {
        let mut store = Self {
            storage: Box::new(storage),
            tasks: BTreeMap::new(),
            next_id: Some(1),
            clock: dates::today,
            load_error: None,
            save_error: None,
        };
        store.load();
        store
    }

    /// Replace the source of "today" used for creation dates, recurrence and
    /// due-soon windows
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// The problem hit while loading, if the store started empty because of it
    pub fn load_error(&self) -> Option<&TodoError> {
        self.load_error.as_ref()
    }

    /// The most recent save failure not yet followed by a successful save.
    ///
    /// When set, the in-memory state is the only up-to-date copy.
    pub fn take_save_error(&mut self) -> Option<TodoError> {
        self.save_error.take()
    }

    pub fn storage_type(&self) -> &'static str {
        self.storage.storage_type()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// ID the next added task will receive.
    ///
    /// `None` once the highest possible ID is taken; `add` then fails with
    /// [`TodoError::IdsExhausted`].
    pub fn next_id(&self) -> Option<u32> {
        self.next_id
    }

    /// All tasks in store order (ascending ID)
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Create, validate and persist a new task.
    ///
    /// Nothing is stored if validation fails.
    pub fn add(&mut self, mut fields: NewTask) -> TodoResult<Task> {
        if fields.created_at.is_none() {
            fields.created_at = Some((self.clock)());
        }

        let task = Task::new(self.allocate_id()?, fields)?;
        self.tasks.insert(task.id(), task.clone());
        self.refresh_next_id();
        self.persist();

        tracing::debug!("Added task {} - {}", task.id(), task.title());
        Ok(task)
    }

    /// Look up a task by ID
    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Apply the supplied fields to a task.
    ///
    /// The whole resulting task is re-validated before it replaces the stored
    /// one; on error the stored task is unchanged and nothing is persisted.
    pub fn update(&mut self, id: u32, update: &TaskUpdate) -> TodoResult<Option<Task>> {
        let Some(current) = self.tasks.get(&id) else {
            return Ok(None);
        };

        let updated = current.with_update(update)?;
        self.tasks.insert(id, updated.clone());
        self.persist();
        Ok(Some(updated))
    }

    /// Remove a task, reporting whether it existed.
    ///
    /// `next_id` is left alone, so a deleted highest ID is not handed out
    /// again by this store instance.
    pub fn delete(&mut self, id: u32) -> bool {
        if self.tasks.remove(&id).is_none() {
            return false;
        }
        self.persist();
        true
    }

    /// Tasks matching the optional status and priority filters
    pub fn list(
        &self,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
        sort_by: Option<SortKey>,
    ) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| matches_filters(t, status, priority))
            .collect();

        if let Some(key) = sort_by {
            sort_tasks(&mut tasks, key);
        }
        tasks
    }

    /// Case-insensitive substring search over title, description and tags.
    ///
    /// An empty query matches every task.
    pub fn search(&self, query: &str) -> Vec<&Task> {
        let needle = query.to_lowercase();
        self.tasks
            .values()
            .filter(|t| matches_query(t, &needle))
            .collect()
    }

    /// Flip a task between pending and complete.
    ///
    /// Completing a pending recurring task also creates its next occurrence:
    /// a new pending task due on the next occurrence date counted from today.
    /// The collection is persisted once either way. Returns the toggled task.
    pub fn toggle(&mut self, id: u32) -> TodoResult<Option<Task>> {
        let today = (self.clock)();
        let Some(task) = self.tasks.get_mut(&id) else {
            return Ok(None);
        };

        let successor = if task.is_pending() && task.is_recurring() {
            let next_id = self
                .next_id
                .ok_or(TodoError::IdsExhausted { max: u32::MAX })?;
            task.successor(next_id, today)?
        } else {
            None
        };

        task.toggle_status();
        let toggled = task.clone();

        if let Some(next) = successor {
            tracing::info!(
                "Task {} completed, created next occurrence {} due {:?}",
                toggled.id(),
                next.id(),
                next.due_date()
            );
            self.tasks.insert(next.id(), next);
            self.refresh_next_id();
        }

        self.persist();
        Ok(Some(toggled))
    }

    /// Pending tasks due between today and `days` from today, inclusive
    pub fn due_soon(&self, days: u32) -> Vec<&Task> {
        let today = (self.clock)();
        let horizon = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        self.tasks
            .values()
            .filter(|t| t.is_pending())
            .filter(|t| {
                t.due_date()
                    .is_some_and(|due| today <= due && due <= horizon)
            })
            .collect()
    }

    fn load(&mut self) {
        match self.storage.load_tasks() {
            Ok(tasks) => {
                for task in tasks {
                    if let Some(previous) = self.tasks.insert(task.id(), task) {
                        tracing::warn!(
                            "Duplicate task ID {} in store, keeping the last",
                            previous.id()
                        );
                    }
                }
                tracing::debug!(
                    "Loaded {} task(s) from {} storage",
                    self.tasks.len(),
                    self.storage.storage_type()
                );
            }
            Err(e) => {
                tracing::warn!("Could not load tasks, starting empty: {}", e);
                self.tasks.clear();
                self.load_error = Some(e);
            }
        }
        self.refresh_next_id();
    }

    fn allocate_id(&self) -> TodoResult<u32> {
        self.next_id.ok_or(TodoError::IdsExhausted { max: u32::MAX })
    }

    fn refresh_next_id(&mut self) {
        self.next_id = match self.tasks.keys().next_back() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        if self.next_id.is_none() {
            tracing::warn!("Task ID {} is in use, no new tasks can be added", u32::MAX);
        }
    }

    fn persist(&mut self) {
        let tasks: Vec<Task> = self.tasks.values().cloned().collect();
        match self.storage.save_tasks(&tasks) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::error!("Failed to save tasks: {}", e);
                self.save_error = Some(e);
            }
        }
    }
}
