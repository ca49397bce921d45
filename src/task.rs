//! Task data structures.
//!
//! This module defines the `Task` record held by the store and the
//! `EditSession` that tracks an in-progress, uncommitted text edit.

use serde::Serialize;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// An in-place edit of one task's text.
///
/// `editing_text` is a working copy; the task's committed text only changes
/// when the session is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    #[serde(rename = "id")]
    pub editing_id: u64,
    #[serde(rename = "text")]
    pub editing_text: String,
}
