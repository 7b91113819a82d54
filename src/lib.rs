//! # Scheduled Todo
//!
//! Core of a scheduled todo list: tasks with an optional due date and time,
//! completion tracking, due-window filters and display ordering.
//!
//! The crate is split in two halves:
//!
//! - [`store::TaskStore`] owns the tasks and is the only thing that mutates them
//!   (add, toggle, edit, delete, clear completed).
//! - [`view`] holds pure functions that turn `(tasks, filter, now)` into the
//!   filtered and sorted rows, per-task priority labels and aggregate counts.
//!
//! [`list::TodoList`] bundles a store with the active filter and is what a UI
//! holds on to. The `todo` binary ships a terminal UI built on top of it.
//!
//! ```
//! use chrono::NaiveDateTime;
//! use scheduled_todo::{clock::FixedClock, fields::Filter, list::TodoList, store::TaskStore};
//!
//! let now = NaiveDateTime::parse_from_str("2024-03-10 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
//! let mut list = TodoList::with_store(TaskStore::with_clock(FixedClock::new(now)));
//! list.store_mut().add("Write report", Some(now.date()), None).unwrap();
//! list.set_filter(Filter::Today);
//!
//! assert_eq!(list.view(now).len(), 1);
//! assert_eq!(list.stats(now).today, 1);
//! ```

pub mod clock;
pub mod error;
pub mod fields;
pub mod list;
pub mod parse;
pub mod store;
pub mod task;
pub mod view;
