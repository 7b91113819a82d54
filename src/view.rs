//! Derived views over the task set.
//!
//! Everything here is a pure function of `(tasks, filter, now)`: filtering,
//! priority classification, display ordering, due labels and aggregate counts.
//! Nothing in this module mutates a task or reads a clock.
//!
//! Note the deliberate asymmetry: `Overdue` compares the exact due instant with
//! `now`, while `Today` and `ThisWeek` compare calendar dates only.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::fields::{Filter, Priority};
use crate::parse::format_time_12h;
use crate::task::Task;

/// Time used when a task has a due date but no due time.
pub fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// The single comparable instant a task is due at, if it has a due date.
pub fn due_instant(task: &Task) -> Option<NaiveDateTime> {
    task.due_date
        .map(|d| d.and_time(task.due_time.unwrap_or_else(end_of_day_time)))
}

/// Whether `task` is kept by `filter` at instant `now`.
pub fn matches_filter(task: &Task, filter: Filter, now: NaiveDateTime) -> bool {
    let today = now.date();
    match filter {
        Filter::All => true,
        Filter::Active => !task.completed,
        Filter::Completed => task.completed,
        Filter::Overdue => !task.completed && due_instant(task).is_some_and(|d| d < now),
        Filter::Today => task.due_date == Some(today),
        Filter::ThisWeek => task
            .due_date
            .is_some_and(|d| d >= today && d < today + Duration::days(7)),
    }
}

/// Tasks kept by `filter`, in store order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: Filter, now: NaiveDateTime) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| matches_filter(t, filter, now))
        .collect()
}

/// Classify a task by how soon it is due.
pub fn priority(task: &Task, now: NaiveDateTime) -> Priority {
    if task.completed {
        return Priority::NoDate;
    }
    let Some(due) = due_instant(task) else {
        return Priority::NoDate;
    };

    let end_of_today = now.date().and_time(end_of_day_time());
    let tomorrow_end = end_of_today + Duration::days(1);
    let week_end = end_of_today + Duration::days(7);

    if due < now {
        Priority::Overdue
    } else if due <= end_of_today {
        Priority::Today
    } else if due <= tomorrow_end {
        Priority::Tomorrow
    } else if due <= week_end {
        Priority::ThisWeek
    } else {
        Priority::Future
    }
}

/// Format a priority for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Overdue => "Overdue",
        Priority::Today => "Due Today",
        Priority::Tomorrow => "Due Tomorrow",
        Priority::ThisWeek => "Due This Week",
        Priority::Future => "Future",
        Priority::NoDate => "No Due Date",
    }
}

/// Display ordering: incomplete before completed, then by due instant
/// ascending, then dateless tasks newest first.
pub fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match (due_instant(a), due_instant(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        })
}

/// Sort in display order. The sort is stable, so equal keys keep store order.
pub fn sort_tasks(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| compare_for_display(a, b));
}

/// Which day a due date falls on, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueDay {
    Today,
    Tomorrow,
    Other(NaiveDate),
}

/// Raw parts of a due-date label; `Display` renders the en-US form
/// ("Today at 3:00 PM", "Jan 5", "Jan 5, 2027").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueLabel {
    pub day: DueDay,
    pub time: Option<NaiveTime>,
    pub show_year: bool,
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            DueDay::Today => f.write_str("Today")?,
            DueDay::Tomorrow => f.write_str("Tomorrow")?,
            DueDay::Other(d) if self.show_year => write!(f, "{}", d.format("%b %-d, %Y"))?,
            DueDay::Other(d) => write!(f, "{}", d.format("%b %-d"))?,
        }
        if let Some(t) = self.time {
            write!(f, " at {}", format_time_12h(t))?;
        }
        Ok(())
    }
}

/// Due label for a task, or `None` when it has no due date.
pub fn due_label(task: &Task, now: NaiveDateTime) -> Option<DueLabel> {
    let date = task.due_date?;
    let today = now.date();
    let day = if date == today {
        DueDay::Today
    } else if date == today + Duration::days(1) {
        DueDay::Tomorrow
    } else {
        DueDay::Other(date)
    };
    Some(DueLabel {
        day,
        time: task.due_time,
        show_year: date.year() != today.year(),
    })
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewItem<'a> {
    pub task: &'a Task,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub due: Option<DueLabel>,
}

/// Filter, sort and annotate the task set for rendering.
pub fn build_view(tasks: &[Task], filter: Filter, now: NaiveDateTime) -> Vec<ViewItem<'_>> {
    let mut visible = filter_tasks(tasks, filter, now);
    sort_tasks(&mut visible);
    visible
        .into_iter()
        .map(|task| {
            let priority = priority(task, now);
            ViewItem {
                task,
                priority,
                priority_label: format_priority(priority),
                due: due_label(task, now),
            }
        })
        .collect()
}

/// Aggregate counts over the whole task set, independent of the active filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
    pub today: usize,
}

pub fn stats(tasks: &[Task], now: NaiveDateTime) -> Stats {
    let count = |filter| tasks.iter().filter(|t| matches_filter(t, filter, now)).count();
    Stats {
        total: tasks.len(),
        active: count(Filter::Active),
        completed: count(Filter::Completed),
        overdue: count(Filter::Overdue),
        today: count(Filter::Today),
    }
}
