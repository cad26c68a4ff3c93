//! Color constants for the terminal user interface.

use ratatui::style::Color;

// These mirror the priority/status vocabulary of the task blocks
// so the list reads at a glance.

/// Used for high-priority tasks
pub const HIGH_RED: Color = Color::Rgb(196, 56, 40);
/// Used for medium-priority tasks
pub const AMBER: Color = Color::Rgb(214, 158, 0);
/// Used for low-priority tasks
pub const STEEL_BLUE: Color = Color::Rgb(70, 130, 180);
/// Used for in-progress rows
pub const SEA_GREEN: Color = Color::Rgb(46, 139, 87);
