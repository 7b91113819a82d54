//! Error types for task operations and input parsing.

use thiserror::Error;

/// Recoverable failures of a store operation. The store is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task text was empty after trimming.
    #[error("Task text cannot be empty")]
    Rejected,

    /// No task has the referenced id.
    #[error("Task not found: {0}")]
    NotFound(u64),
}

/// Failures turning user-entered due values into dates and times.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid due date: '{0}' (expected YYYY-MM-DD, 'today', 'tomorrow', 'in 3d', ...)")]
    InvalidDate(String),

    #[error("Invalid due time: '{0}' (expected HH:MM or 3:30pm)")]
    InvalidTime(String),
}
