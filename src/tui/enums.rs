//! Enumerations for TUI state management.

/// Which screen is shown.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TaskList,
    Help,
}

/// Where typed keys go while the task list is shown.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    NewTask,
    List,
}
