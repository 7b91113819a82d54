//! Color constants for the terminal user interface.

use ratatui::style::Color;

use scheduled_todo::fields::Priority;

pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
pub const ORANGE: Color = Color::Rgb(255, 140, 0);

/// Badge color for a due-date priority.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Overdue => Color::Red,
        Priority::Today => ORANGE,
        Priority::Tomorrow => GOLD,
        Priority::ThisWeek => DARK_GREEN,
        Priority::Future => Color::Blue,
        Priority::NoDate => Color::DarkGray,
    }
}
