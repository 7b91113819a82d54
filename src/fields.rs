//! Enumerations used to select and classify tasks.
//!
//! `Filter` is the view mode chosen by the user, `Priority` is the due-date
//! classification shown next to each task.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// View mode controlling which tasks are listed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
    Overdue,
    Today,
    #[serde(alias = "thisweek")]
    #[value(alias = "thisweek")]
    ThisWeek,
}

impl Filter {
    /// Every selector in display order.
    pub const ALL: [Filter; 6] = [
        Filter::All,
        Filter::Active,
        Filter::Completed,
        Filter::Overdue,
        Filter::Today,
        Filter::ThisWeek,
    ];

    /// Parse a selector string, falling back to `All` for anything unknown.
    pub fn from_selector(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => Filter::Active,
            "completed" => Filter::Completed,
            "overdue" => Filter::Overdue,
            "today" => Filter::Today,
            "thisweek" | "this-week" | "this_week" => Filter::ThisWeek,
            _ => Filter::All,
        }
    }

    /// Short tab label.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
            Filter::Overdue => "Overdue",
            Filter::Today => "Today",
            Filter::ThisWeek => "This Week",
        }
    }

    /// Next selector, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Heading shown when the filtered list is empty.
    pub fn empty_title(self) -> &'static str {
        match self {
            Filter::All => "No tasks yet",
            Filter::Active => "No active tasks",
            Filter::Completed => "No completed tasks",
            Filter::Overdue => "No overdue tasks",
            Filter::Today => "No tasks due today",
            Filter::ThisWeek => "No tasks due this week",
        }
    }

    /// Hint shown under the empty-state heading.
    pub fn empty_hint(self) -> &'static str {
        match self {
            Filter::All => "Add your first task above to get started with scheduling!",
            Filter::Active => "All your tasks are completed!",
            Filter::Completed => "Complete some tasks to see them here.",
            Filter::Overdue => "Great! You're on top of your schedule.",
            Filter::Today => "No tasks are due today. Take a break!",
            Filter::ThisWeek => "Your week looks clear so far.",
        }
    }
}

/// Due-date classification used for display emphasis.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Future,
    NoDate,
}
