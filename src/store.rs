//! In-memory task store.
//!
//! `TaskStore` owns the ordered task collection and is the only place tasks are
//! mutated. Every operation is all-or-nothing: a rejected or missing-id call
//! leaves the collection exactly as it was.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::TaskError;
use crate::task::Task;

/// Ordered collection of tasks with a monotonically increasing id counter.
#[derive(Debug)]
pub struct TaskStore<C = SystemClock> {
    tasks: Vec<Task>,
    next_id: u64,
    clock: C,
}

impl TaskStore<SystemClock> {
    /// Create an empty store reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TaskStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TaskStore<C> {
    /// Create an empty store stamping tasks with `clock`.
    pub fn with_clock(clock: C) -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Append a new task.
    ///
    /// The text is trimmed; blank text is rejected without consuming an id.
    /// A due time given without a due date is dropped.
    pub fn add(
        &mut self,
        text: &str,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Result<&Task, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("rejected add with empty text");
            return Err(TaskError::Rejected);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            due_date,
            due_time: due_date.and(due_time),
            created_at: self.clock.now(),
            completed_at: None,
        });
        debug!(id, total = self.tasks.len(), "task added");

        let idx = self.tasks.len() - 1;
        Ok(&self.tasks[idx])
    }

    /// Flip the completion state of a task, stamping or clearing `completed_at`.
    pub fn toggle(&mut self, id: u64) -> Result<&Task, TaskError> {
        let now = self.clock.now();
        let Some(task) = self.get_mut(id) else {
            warn!(id, "toggle: task not found");
            return Err(TaskError::NotFound(id));
        };

        task.completed = !task.completed;
        task.completed_at = task.completed.then_some(now);
        debug!(id, completed = task.completed, "task toggled");
        Ok(task)
    }

    /// Remove a task by ID. Returns whether anything was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() < before;
        if removed {
            debug!(id, "task deleted");
        } else {
            warn!(id, "delete: task not found");
        }
        removed
    }

    /// Replace the text and schedule of a task.
    ///
    /// Either due field may be cleared by passing `None`. Blank text is rejected
    /// and the task is left untouched.
    pub fn edit(
        &mut self,
        id: u64,
        new_text: &str,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Result<&Task, TaskError> {
        let new_text = new_text.trim();
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(id, "edit: task not found");
            return Err(TaskError::NotFound(id));
        };
        if new_text.is_empty() {
            debug!(id, "rejected edit with empty text");
            return Err(TaskError::Rejected);
        }

        task.text = new_text.to_string();
        task.due_date = due_date;
        task.due_time = due_date.and(due_time);
        debug!(id, "task edited");
        Ok(task)
    }

    /// Remove every completed task, returning how many were removed.
    ///
    /// Performs no confirmation; the caller is expected to have asked first.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            debug!(removed, "cleared completed tasks");
        }
        removed
    }
}
