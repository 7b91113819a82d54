//! The caller-owned todo list: one store plus the active filter.
//!
//! The UI drives mutations through [`TodoList::store_mut`] and pulls the
//! ordered view and statistics back out after every change.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::fields::Filter;
use crate::store::TaskStore;
use crate::view::{self, Stats, ViewItem};

#[derive(Debug)]
pub struct TodoList<C = SystemClock> {
    store: TaskStore<C>,
    filter: Filter,
}

impl TodoList<SystemClock> {
    pub fn new() -> Self {
        Self::with_store(TaskStore::new())
    }
}

impl Default for TodoList<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TodoList<C> {
    pub fn with_store(store: TaskStore<C>) -> Self {
        TodoList {
            store,
            filter: Filter::All,
        }
    }

    pub fn store(&self) -> &TaskStore<C> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<C> {
        &mut self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(?filter, "filter changed");
        self.filter = filter;
    }

    /// Filtered, sorted and annotated rows for the active filter.
    pub fn view(&self, now: NaiveDateTime) -> Vec<ViewItem<'_>> {
        view::build_view(self.store.tasks(), self.filter, now)
    }

    /// Counts over every task, regardless of the active filter.
    pub fn stats(&self, now: NaiveDateTime) -> Stats {
        view::stats(self.store.tasks(), now)
    }

    /// Confirmation question to ask before clearing completed tasks, or
    /// `None` when there is nothing to clear.
    pub fn clear_completed_prompt(&self) -> Option<String> {
        let n = self.store.completed_count();
        (n > 0).then(|| {
            format!(
                "Are you sure you want to delete {} completed task{}?",
                n,
                if n == 1 { "" } else { "s" }
            )
        })
    }
}
