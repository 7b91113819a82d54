//! Enumerations for TUI state management.

/// Which screen the terminal user interface is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    AddTask,
    EditTask,
    Help,
    Confirm,
}

/// Fields of the add/edit form, in tab order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormField {
    Text,
    DueDate,
    DueTime,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Text => FormField::DueDate,
            FormField::DueDate => FormField::DueTime,
            FormField::DueTime => FormField::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Text => FormField::DueTime,
            FormField::DueDate => FormField::Text,
            FormField::DueTime => FormField::DueDate,
        }
    }
}
