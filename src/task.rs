//! Task data structure.
//!
//! A `Task` is a single todo item with an optional due date and time. Tasks are
//! owned by the [`TaskStore`](crate::store::TaskStore); callers only ever see
//! shared references handed out by the store.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// A todo item with scheduling metadata.
///
/// `completed_at` is set exactly when `completed` is true, and `due_time` is only
/// ever present alongside a `due_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}
