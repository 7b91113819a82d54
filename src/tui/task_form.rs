//! Add/edit form for the terminal user interface.
//!
//! The form holds raw text for the task, its due date and its due time. Values
//! are only parsed when the form is submitted.

use chrono::{NaiveDate, NaiveTime};

use scheduled_todo::error::ParseError;
use scheduled_todo::parse::{parse_due_date, parse_due_time};
use scheduled_todo::task::Task;

use crate::tui::enums::FormField;
use crate::tui::input::InputField;

/// Parsed form values ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub text: String,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
}

pub struct TaskForm {
    pub text: InputField,
    pub due_date: InputField,
    pub due_time: InputField,
    pub current_field: FormField,
}

impl TaskForm {
    /// An empty form with focus on the text field.
    pub fn new() -> Self {
        let mut form = Self {
            text: InputField::new(),
            due_date: InputField::new(),
            due_time: InputField::new(),
            current_field: FormField::Text,
        };
        form.update_active_field();
        form
    }

    /// A form pre-filled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let date = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let time = task
            .due_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        let mut form = Self {
            text: InputField::with_value(&task.text),
            due_date: InputField::with_value(&date),
            due_time: InputField::with_value(&time),
            current_field: FormField::Text,
        };
        form.update_active_field();
        form
    }

    pub fn current_input(&mut self) -> &mut InputField {
        match self.current_field {
            FormField::Text => &mut self.text,
            FormField::DueDate => &mut self.due_date,
            FormField::DueTime => &mut self.due_time,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = self.current_field.prev();
        self.update_active_field();
    }

    pub fn focus(&mut self, field: FormField) {
        self.current_field = field;
        self.update_active_field();
    }

    pub fn update_active_field(&mut self) {
        self.text.active = self.current_field == FormField::Text;
        self.due_date.active = self.current_field == FormField::DueDate;
        self.due_time.active = self.current_field == FormField::DueTime;
    }

    /// Empty both schedule fields and return focus to the text.
    pub fn clear_schedule(&mut self) {
        self.due_date.clear();
        self.due_time.clear();
        self.focus(FormField::Text);
    }

    /// Parse the schedule fields. Text validation is left to the store.
    pub fn values(&self, today: NaiveDate) -> Result<FormValues, ParseError> {
        Ok(FormValues {
            text: self.text.value.clone(),
            due_date: parse_due_date(&self.due_date.value, today)?,
            due_time: parse_due_time(&self.due_time.value)?,
        })
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn values_parse_schedule_fields() {
        let mut form = TaskForm::new();
        form.text = InputField::with_value("Dentist");
        form.due_date = InputField::with_value("tomorrow");
        form.due_time = InputField::with_value("3pm");

        let v = form.values(date("2024-03-10")).unwrap();
        assert_eq!(v.text, "Dentist");
        assert_eq!(v.due_date, Some(date("2024-03-11")));
        assert_eq!(v.due_time, NaiveTime::from_hms_opt(15, 0, 0));
    }

    #[test]
    fn bad_date_is_reported() {
        let mut form = TaskForm::new();
        form.due_date = InputField::with_value("someday");
        assert!(matches!(
            form.values(date("2024-03-10")),
            Err(ParseError::InvalidDate(_))
        ));
    }

    #[test]
    fn clear_schedule_empties_date_and_time() {
        let mut form = TaskForm::new();
        form.due_date = InputField::with_value("2024-03-12");
        form.due_time = InputField::with_value("10:00");
        form.focus(FormField::DueTime);

        form.clear_schedule();
        assert!(form.due_date.value.is_empty());
        assert!(form.due_time.value.is_empty());
        assert_eq!(form.current_field, FormField::Text);
        assert!(form.text.active);
    }

    #[test]
    fn field_focus_cycles() {
        let mut form = TaskForm::new();
        form.next_field();
        assert!(form.due_date.active);
        form.next_field();
        form.next_field();
        assert_eq!(form.current_field, FormField::Text);
        form.prev_field();
        assert_eq!(form.current_field, FormField::DueTime);
    }
}
