//! Task list manager.
//!
//! Holds the ordered task collection (newest first) and writes the whole
//! collection back to the store after every mutation.

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, warn};

use super::task::{from_snapshot, to_snapshot, Summary, Task, TaskId};
use crate::error::PomodoError;
use crate::storage::KeyValueStore;

/// Store key holding the serialized collection.
pub const STORAGE_KEY: &str = "pomodoroTasks";

/// An ordered, persisted to-do list.
pub struct TaskList<S> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Load the collection from `store`.
    ///
    /// A missing, unreadable or corrupt entry yields an empty list.
    pub fn load(store: S) -> Self {
        let tasks = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => from_snapshot(&raw).unwrap_or_else(|e| {
                warn!("ignoring unreadable task list: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read task list, starting empty: {e}");
                Vec::new()
            }
        };
        debug!("loaded {} tasks", tasks.len());

        Self { store, tasks }
    }

    /// Add a task with the current time.
    ///
    /// Returns `None` without touching the store if `text` is blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn add(&mut self, text: &str) -> Result<Option<Task>, PomodoError> {
        self.add_at(text, Utc::now())
    }

    /// Add a task created at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> Result<Option<Task>, PomodoError> {
        let id = self.next_id(now.timestamp_millis());
        let created_at = Utc
            .timestamp_millis_opt(now.timestamp_millis())
            .single()
            .unwrap_or(now);

        let Some(task) = Task::new(id, text, created_at) else {
            return Ok(None);
        };

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task.clone());
        next.extend(self.tasks.iter().cloned());
        self.commit(next)?;
        Ok(Some(task))
    }

    /// Flip the completed flag of a task.
    ///
    /// Returns the new flag, or `None` if no task has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn toggle(&mut self, id: TaskId) -> Result<Option<bool>, PomodoError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        next[index].completed = !next[index].completed;
        let completed = next[index].completed;
        self.commit(next)?;
        Ok(Some(completed))
    }

    /// Delete a task by id, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn delete(&mut self, id: TaskId) -> Result<Option<Task>, PomodoError> {
        let mut next = self.tasks.clone();
        let index = next.iter().position(|t| t.id == id);
        let removed = index.map(|i| next.remove(i));

        self.commit(next)?;
        Ok(removed)
    }

    /// Remove every completed task, keeping the order of the rest.
    ///
    /// Returns how many were removed. Nothing is written when none are
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn clear_completed(&mut self) -> Result<usize, PomodoError> {
        let before = self.tasks.len();
        if self.completed_count() == 0 {
            return Ok(0);
        }

        let next: Vec<Task> = self.tasks.iter().filter(|t| !t.completed).cloned().collect();
        self.commit(next)?;
        Ok(before - self.tasks.len())
    }

    /// Mark the first incomplete task in list order as completed.
    ///
    /// Returns the completed task's id, or `None` if every task is done.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn auto_complete_oldest_incomplete(&mut self) -> Result<Option<TaskId>, PomodoError> {
        let Some(index) = self.tasks.iter().position(|t| !t.completed) else {
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        next[index].completed = true;
        let id = next[index].id;
        self.commit(next)?;
        Ok(Some(id))
    }

    /// Counter text state for the list.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let total = self.tasks.len();
        let remaining = total - self.completed_count();

        if total == 0 {
            Summary::Empty
        } else if remaining == 0 {
            Summary::AllDone { total }
        } else {
            Summary::Remaining { remaining, total }
        }
    }

    /// The tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    fn next_id(&self, now_ms: i64) -> TaskId {
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        }
    }

    /// Write `next` to the store, then make it the current list.
    ///
    /// On a failed write the current list is left as it was.
    fn commit(&mut self, next: Vec<Task>) -> Result<(), PomodoError> {
        let snapshot = to_snapshot(&next)?;
        self.store.set(STORAGE_KEY, &snapshot)?;
        debug!("persisted {} tasks", next.len());
        self.tasks = next;
        Ok(())
    }
}
