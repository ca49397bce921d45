//! View filter for the task list.
//!
//! The filter only selects which tasks are presented; it never removes or
//! mutates anything in the collection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Which subset of the task list is currently shown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    #[serde(alias = "All")]
    All,
    #[serde(alias = "Completed")]
    Completed,
    #[serde(alias = "Incomplete")]
    Incomplete,
}

impl Filter {
    /// Every filter in selector order.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Incomplete];

    /// Whether `task` belongs to this view.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Incomplete => !task.completed,
        }
    }

    /// The next filter in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Completed,
            Filter::Completed => Filter::Incomplete,
            Filter::Incomplete => Filter::All,
        }
    }

    /// The previous filter in selector order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Filter::All => Filter::Incomplete,
            Filter::Completed => Filter::All,
            Filter::Incomplete => Filter::Completed,
        }
    }
}

/// Lowercase name used on the command line, in config files and scripts.
pub fn filter_name(f: Filter) -> &'static str {
    match f {
        Filter::All => "all",
        Filter::Completed => "completed",
        Filter::Incomplete => "incomplete",
    }
}

/// Label shown on the filter selector.
pub fn format_filter(f: Filter) -> &'static str {
    match f {
        Filter::All => "All",
        Filter::Completed => "Completed",
        Filter::Incomplete => "Incomplete",
    }
}

/// Parse a filter name, ignoring case and surrounding whitespace.
pub fn parse_filter(s: &str) -> Option<Filter> {
    match s.trim().to_lowercase().as_str() {
        "all" => Some(Filter::All),
        "completed" | "done" => Some(Filter::Completed),
        "incomplete" | "active" | "open" => Some(Filter::Incomplete),
        _ => None,
    }
}
