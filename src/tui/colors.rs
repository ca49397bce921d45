//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar background
pub const BRAND: Color = Color::Rgb(175, 47, 47);
/// Selected filter in the footer
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Completed task text
pub const DONE_GREY: Color = Color::Rgb(110, 110, 110);
/// Text of a task under edit
pub const EDIT_CYAN: Color = Color::Rgb(0, 190, 200);
