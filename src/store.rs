//! In-memory task store.
//!
//! `TaskStore` owns the task collection, the current view filter and the
//! optional edit session. Every operation runs to completion synchronously
//! and is total: empty input, unknown ids and a missing edit session are
//! no-ops rather than errors. Return values only report whether anything
//! changed.

use tracing::{debug, trace};

use crate::fields::Filter;
use crate::task::{EditSession, Task};

/// The task list, its view filter and the active edit session.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    filter: Filter,
    edit: Option<EditSession>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store showing all tasks.
    pub fn new() -> Self {
        Self::with_filter(Filter::All)
    }

    /// Create an empty store with an initial view filter.
    pub fn with_filter(filter: Filter) -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
            filter,
            edit: None,
        }
    }

    /// All tasks in insertion order, regardless of filter.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Append a task with the trimmed `raw_text`.
    ///
    /// Whitespace-only input is ignored. Returns the new task's id.
    pub fn add_task(&mut self, raw_text: &str) -> Option<u64> {
        let text = raw_text.trim();
        if text.is_empty() {
            trace!("ignoring empty task text");
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        debug!(id, "task added");
        Some(id)
    }

    /// Remove the task with `id`. Removing the task under edit also ends the session.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            trace!(id, "delete of unknown task");
            return false;
        }
        if self.edit.as_ref().is_some_and(|s| s.editing_id == id) {
            self.edit = None;
        }
        debug!(id, "task deleted");
        true
    }

    /// Flip the completion flag of the task with `id`.
    pub fn toggle_completion(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "task toggled");
                true
            }
            None => {
                trace!(id, "toggle of unknown task");
                false
            }
        }
    }

    /// Start editing the task with `id`, seeding the buffer with its text.
    ///
    /// Replaces any active session; that session's uncommitted text is lost.
    pub fn begin_edit(&mut self, id: u64) -> bool {
        let Some(task) = self.get(id) else {
            trace!(id, "edit of unknown task");
            return false;
        };
        let session = EditSession {
            editing_id: id,
            editing_text: task.text.clone(),
        };
        if let Some(prev) = self.edit.replace(session) {
            debug!(id, abandoned = prev.editing_id, "edit session replaced");
        } else {
            debug!(id, "edit started");
        }
        true
    }

    /// Replace the working text of the active session.
    pub fn update_editing_text(&mut self, text: &str) -> bool {
        match self.edit.as_mut() {
            Some(session) => {
                session.editing_text = text.to_string();
                true
            }
            None => {
                trace!("text update without edit session");
                false
            }
        }
    }

    /// Write the working text to the task and end the session.
    ///
    /// The text is stored verbatim: unlike `add_task` it is neither trimmed
    /// nor checked for emptiness. Returns the id of the updated task.
    pub fn commit_edit(&mut self) -> Option<u64> {
        let Some(session) = self.edit.take() else {
            trace!("commit without edit session");
            return None;
        };
        let id = session.editing_id;
        match self.get_mut(id) {
            Some(task) => {
                task.text = session.editing_text;
                debug!(id, "edit committed");
                Some(id)
            }
            None => {
                trace!(id, "edited task no longer exists");
                None
            }
        }
    }

    /// End the session without touching the task.
    pub fn cancel_edit(&mut self) -> bool {
        match self.edit.take() {
            Some(session) => {
                debug!(id = session.editing_id, "edit cancelled");
                true
            }
            None => false,
        }
    }

    /// Replace the current filter, returning the previous one.
    pub fn set_filter(&mut self, filter: Filter) -> Filter {
        let prev = std::mem::replace(&mut self.filter, filter);
        if prev != filter {
            debug!(?filter, "filter changed");
        }
        prev
    }

    /// Tasks matching the current filter, in collection order.
    ///
    /// The iterator is lazy and can be cloned to walk the view again.
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        let filter = self.filter;
        self.tasks.iter().filter(move |t| filter.matches(t))
    }

    /// Number of incomplete tasks in the whole collection.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }
}
