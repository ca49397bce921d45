//! User intents and the read-only view a renderer redraws from.
//!
//! Renderers translate their input events (key presses, script lines) into
//! an [`Intent`] and hand it to [`TaskStore::apply`]. After each intent they
//! re-read the store, usually through a [`Snapshot`].

use serde::Serialize;

use crate::fields::Filter;
use crate::store::TaskStore;
use crate::task::{EditSession, Task};

/// A single user action against the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Toggle(u64),
    Delete(u64),
    BeginEdit(u64),
    UpdateEdit(String),
    CommitEdit,
    CancelEdit,
    SetFilter(Filter),
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub filter: Filter,
    pub remaining: usize,
    pub total: usize,
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<EditSession>,
}

impl TaskStore {
    /// Apply an intent. Returns true when the store changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Add(text) => self.add_task(&text).is_some(),
            Intent::Toggle(id) => self.toggle_completion(id),
            Intent::Delete(id) => self.delete_task(id),
            Intent::BeginEdit(id) => self.begin_edit(id),
            Intent::UpdateEdit(text) => self.update_editing_text(&text),
            Intent::CommitEdit => self.commit_edit().is_some(),
            Intent::CancelEdit => self.cancel_edit(),
            Intent::SetFilter(filter) => self.set_filter(filter) != filter,
        }
    }

    /// Capture the visible tasks, counts, filter and edit session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            filter: self.filter(),
            remaining: self.remaining_count(),
            total: self.len(),
            tasks: self.visible_tasks().cloned().collect(),
            editing: self.edit_session().cloned(),
        }
    }
}

/// Text shown in footers, e.g. "1 item left".
pub fn format_remaining(n: usize) -> String {
    if n == 1 {
        "1 item left".to_string()
    } else {
        format!("{n} items left")
    }
}
