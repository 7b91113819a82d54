//! Main application logic for the terminal user interface.
//!
//! `App` owns the todo list, forwards key presses to store operations, and
//! re-reads the ordered view and statistics after every change. It never
//! edits a task directly.

use std::io;
use std::time::Duration;

use chrono::NaiveDateTime;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::{debug, warn};

use scheduled_todo::clock::{Clock, SystemClock};
use scheduled_todo::error::TaskError;
use scheduled_todo::fields::{Filter, Priority};
use scheduled_todo::list::TodoList;

use crate::tui::{
    colors::{priority_color, DARK_RED, GOLD},
    enums::{AppState, FormField},
    input::InputField,
    task_form::TaskForm,
    utils::centered_rect,
};

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    list: TodoList,
    clock: SystemClock,
    table_state: TableState,
    visible: Vec<u64>,
    form: TaskForm,
    editing: Option<u64>,
    status_message: String,
    confirm_prompt: Option<String>,
}

impl App {
    /// Create an app with an empty list showing `filter`.
    pub fn new(filter: Filter) -> Self {
        let mut list = TodoList::new();
        list.set_filter(filter);
        let mut app = App {
            state: AppState::TaskList,
            list,
            clock: SystemClock,
            table_state: TableState::default(),
            visible: Vec::new(),
            form: TaskForm::new(),
            editing: None,
            status_message: String::new(),
            confirm_prompt: None,
        };
        app.refresh();
        app
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Recompute the visible rows, keeping the selection on the same task when
    /// it is still shown.
    fn refresh(&mut self) {
        self.refresh_selecting(None);
    }

    fn refresh_selecting(&mut self, prefer: Option<u64>) {
        let old_selected = prefer.or_else(|| self.selected_id());
        let now = self.now();
        self.visible = self.list.view(now).iter().map(|item| item.task.id).collect();

        let idx = old_selected
            .and_then(|id| self.visible.iter().position(|&v| v == id))
            .or_else(|| {
                let last = self.visible.len().checked_sub(1)?;
                Some(self.table_state.selected().unwrap_or(0).min(last))
            });
        self.table_state.select(idx);
    }

    fn selected_id(&self) -> Option<u64> {
        self.table_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn set_filter(&mut self, filter: Filter) {
        self.list.set_filter(filter);
        self.refresh();
    }

    fn open_add_form(&mut self) {
        self.form = TaskForm::new();
        self.editing = None;
        self.state = AppState::AddTask;
    }

    fn open_edit_form(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.list.store().get(id) {
            Some(task) => {
                self.form = TaskForm::from_task(task);
                self.editing = Some(id);
                self.state = AppState::EditTask;
            }
            None => self.set_status_message(TaskError::NotFound(id).to_string()),
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.list.store_mut().toggle(id) {
            Ok(task) => {
                let msg = if task.completed {
                    format!("Completed: {}", task.text)
                } else {
                    format!("Reopened: {}", task.text)
                };
                self.set_status_message(msg);
            }
            Err(e) => self.set_status_message(e.to_string()),
        }
        self.refresh_selecting(Some(id));
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.list.store_mut().delete(id) {
            self.set_status_message("Task deleted");
        } else {
            self.set_status_message(TaskError::NotFound(id).to_string());
        }
        self.refresh();
    }

    fn request_clear_completed(&mut self) {
        match self.list.clear_completed_prompt() {
            Some(prompt) => {
                self.confirm_prompt = Some(prompt);
                self.state = AppState::Confirm;
            }
            None => self.set_status_message("No completed tasks to clear"),
        }
    }

    /// Parse the form and hand it to the store. Stays on the form when the
    /// input is rejected.
    fn submit_form(&mut self) {
        let now = self.now();
        let values = match self.form.values(now.date()) {
            Ok(v) => v,
            Err(e) => {
                self.set_status_message(e.to_string());
                return;
            }
        };
        let dropped_time = values.due_date.is_none() && values.due_time.is_some();
        let was_edit = self.editing.is_some();

        let store = self.list.store_mut();
        let result = match self.editing {
            Some(id) => store
                .edit(id, &values.text, values.due_date, values.due_time)
                .map(|t| t.id),
            None => store
                .add(&values.text, values.due_date, values.due_time)
                .map(|t| t.id),
        };

        match result {
            Ok(id) => {
                self.state = AppState::TaskList;
                self.editing = None;
                if dropped_time {
                    self.set_status_message("Due time ignored without a due date");
                } else {
                    self.set_status_message(if was_edit { "Task updated" } else { "Task saved" });
                }
                self.refresh_selecting(Some(id));
            }
            Err(TaskError::Rejected) => {
                self.form.focus(FormField::Text);
                self.set_status_message(TaskError::Rejected.to_string());
            }
            Err(e @ TaskError::NotFound(_)) => {
                warn!(error = %e, "task vanished while editing");
                self.state = AppState::TaskList;
                self.editing = None;
                self.set_status_message(e.to_string());
                self.refresh();
            }
        }
    }

    /// Handle keyboard input in the task list. Returns true to quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.table_state.selected() {
                    self.table_state.select(Some(selected.saturating_sub(1)));
                } else if !self.visible.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.table_state.selected() {
                    if selected + 1 < self.visible.len() {
                        self.table_state.select(Some(selected + 1));
                    }
                } else if !self.visible.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit_form(),
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('c') => self.request_clear_completed(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Tab => self.set_filter(self.list.filter().next()),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.set_filter(Filter::ALL[idx]);
            }
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.editing = None;
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.clear_schedule();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.current_input().move_cursor_left(),
            KeyCode::Right => self.form.current_input().move_cursor_right(),
            KeyCode::Home => self.form.current_input().move_home(),
            KeyCode::End => self.form.current_input().move_end(),
            KeyCode::Backspace => self.form.current_input().handle_backspace(),
            KeyCode::Delete => self.form.current_input().handle_delete(),
            KeyCode::Char(c) => self.form.current_input().handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let removed = self.list.store_mut().clear_completed();
                self.set_status_message(format!(
                    "Cleared {} completed task{}",
                    removed,
                    if removed == 1 { "" } else { "s" }
                ));
                self.state = AppState::TaskList;
                self.confirm_prompt = None;
                self.refresh();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.confirm_prompt = None;
            }
            _ => {}
        }
    }

    /// Dispatch one key press to the current screen. Returns true to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.status_message.clear();
        debug!(state = ?self.state, code = ?key.code, "key");

        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key.code, key.modifiers),
            AppState::AddTask | AppState::EditTask => {
                self.handle_form_input(key.code, key.modifiers)
            }
            AppState::Confirm => self.handle_confirm_input(key.code),
            AppState::Help => self.state = AppState::TaskList,
        }
        false
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect, now: NaiveDateTime) {
        let stats = self.list.stats(now);
        let line = Line::from(vec![
            Span::styled("SCHEDULED TODO", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::raw(format!("Total {}", stats.total)),
            Span::raw("  |  "),
            Span::raw(format!("Active {}", stats.active)),
            Span::raw("  |  "),
            Span::raw(format!("Completed {}", stats.completed)),
            Span::raw("  |  "),
            Span::styled(
                format!("Overdue {}", stats.overdue),
                Style::default().fg(priority_color(Priority::Overdue)),
            ),
            Span::raw("  |  "),
            Span::styled(
                format!("Today {}", stats.today),
                Style::default().fg(priority_color(Priority::Today)),
            ),
        ]);
        let header = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_filter_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Filter::ALL
            .iter()
            .enumerate()
            .map(|(i, filter)| Line::from(format!("{} {}", i + 1, filter.label())))
            .collect();
        let selected = Filter::ALL
            .iter()
            .position(|f| *f == self.list.filter())
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(Block::default().borders(Borders::ALL).title("Filter (Tab / 1-6)"))
            .highlight_style(Style::default().fg(Color::Black).bg(GOLD));
        f.render_widget(tabs, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let now = self.now();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_header(f, chunks[0], now);
        self.render_filter_tabs(f, chunks[1]);

        let filter = self.list.filter();
        let items = self.list.view(now);
        let title = format!("Tasks ({}/{})", items.len(), self.list.store().len());

        if items.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    filter.empty_title(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(filter.empty_hint()),
            ];
            let empty = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title(title))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(empty, chunks[2]);
            return;
        }

        let header = Row::new(["", "Task", "Priority", "Due"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .height(1);

        let rows: Vec<Row> = items
            .iter()
            .map(|item| {
                let task = item.task;
                let check = if task.completed { "[x]" } else { "[ ]" };
                let (badge, due) = match item.due {
                    Some(label) => (
                        Cell::from(item.priority_label)
                            .style(Style::default().fg(priority_color(item.priority))),
                        Cell::from(label.to_string()),
                    ),
                    None => (Cell::from(""), Cell::from("")),
                };
                let style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![Cell::from(check), Cell::from(task.text.as_str()), badge, due])
                    .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Min(25),
            Constraint::Length(14),
            Constraint::Length(26),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[2], &mut self.table_state);
    }

    fn render_input(f: &mut Frame, area: Rect, label: &str, field: &InputField) {
        let border = if field.active {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let input = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(label),
        );
        f.render_widget(input, area);
        if field.active {
            let cursor = u16::try_from(field.cursor).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(1).saturating_add(cursor);
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let title = if self.state == AppState::EditTask {
            "Edit Task"
        } else {
            "Add Task"
        };
        let area = centered_rect(70, 60, area);
        f.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        Self::render_input(f, chunks[0], "Task", &self.form.text);
        Self::render_input(
            f,
            chunks[1],
            "Due date (YYYY-MM-DD, today, tomorrow, fri, in 3d)",
            &self.form.due_date,
        );
        Self::render_input(f, chunks[2], "Due time (HH:MM or 3:30pm)", &self.form.due_time);

        let hint = Paragraph::new(
            "Enter save | Tab next field | Ctrl+D clear date & time | Esc cancel",
        )
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[3]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let lines = [
            ("a", "Add a task"),
            ("e / Enter", "Edit the selected task"),
            ("Space / x", "Toggle completed"),
            ("d / Del", "Delete the selected task"),
            ("c", "Clear completed tasks"),
            ("Tab / 1-6", "Change filter"),
            ("Up / Down", "Move selection"),
            ("q / Esc", "Quit"),
        ];
        let text: Vec<Line> = lines
            .iter()
            .map(|(k, d)| {
                Line::from(vec![
                    Span::styled(format!("{k:>12}  "), Style::default().fg(GOLD)),
                    Span::raw(*d),
                ])
            })
            .collect();
        let help = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help (any key to close)"));
        f.render_widget(help, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.confirm_prompt.as_deref().unwrap_or(""),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => {
                    let completed = self.list.store().completed_count();
                    let clear = if completed > 0 {
                        format!("c Clear Completed ({completed})")
                    } else {
                        "c Clear Completed".to_string()
                    };
                    format!(
                        "Tasks: {} | a add  e edit  space toggle  d delete  {clear}  h help  q quit",
                        self.visible.len()
                    )
                }
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the current screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::AddTask | AppState::EditTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0]);
            }
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App, text: &str, due: &str) {
        press(app, KeyCode::Char('a'));
        type_text(app, text);
        press(app, KeyCode::Tab);
        type_text(app, due);
        press(app, KeyCode::Enter);
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_list_shows_filter_specific_copy() {
        let mut app = App::new(Filter::Overdue);
        let text = screen(&mut app);
        assert!(text.contains("No overdue tasks"));
    }

    #[test]
    fn blank_add_keeps_form_open() {
        let mut app = App::new(Filter::All);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::AddTask);
        assert_eq!(app.status_message, "Task text cannot be empty");
        assert!(app.list.store().is_empty());
    }

    #[test]
    fn add_toggle_and_clear_completed_flow() {
        let mut app = App::new(Filter::All);
        add(&mut app, "Pay rent", "today");
        add(&mut app, "Read book", "");
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.list.store().len(), 2);

        // Dated task sorts first and is selected after refresh.
        let rent = app.list.store().tasks()[0].id;
        app.table_state.select(Some(0));
        assert_eq!(app.selected_id(), Some(rent));

        press(&mut app, KeyCode::Char(' '));
        assert!(app.list.store().get(rent).is_some_and(|t| t.completed));

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::Confirm);
        assert_eq!(
            app.confirm_prompt.as_deref(),
            Some("Are you sure you want to delete 1 completed task?")
        );
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.list.store().len(), 1);
        assert!(app.list.store().get(rent).is_none());
    }

    #[test]
    fn clear_completed_with_nothing_completed_skips_confirm() {
        let mut app = App::new(Filter::All);
        add(&mut app, "Only task", "");
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.status_message, "No completed tasks to clear");
    }

    #[test]
    fn number_keys_switch_filter() {
        let mut app = App::new(Filter::All);
        add(&mut app, "Later", "");
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.list.filter(), Filter::Today);
        assert!(app.visible.is_empty());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.list.filter(), Filter::ThisWeek);
    }

    #[test]
    fn invalid_date_is_reported_without_saving() {
        let mut app = App::new(Filter::All);
        add(&mut app, "Mystery", "someday");
        assert_eq!(app.state, AppState::AddTask);
        assert!(app.status_message.starts_with("Invalid due date"));
        assert!(app.list.store().is_empty());
    }

    #[test]
    fn out_of_range_offset_is_reported_without_saving() {
        let mut app = App::new(Filter::All);
        add(&mut app, "Far off", "in 100000000d");
        assert_eq!(app.state, AppState::AddTask);
        assert!(app.status_message.starts_with("Invalid due date: 'in 100000000d'"));
        assert!(app.list.store().is_empty());
    }

    #[test]
    fn input_cursor_is_clamped_inside_the_box() {
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        let field = InputField {
            value: "x".to_string(),
            cursor: usize::MAX,
            active: true,
        };
        let area = Rect::new(0, 0, 20, 3);
        terminal
            .draw(|f| App::render_input(f, area, "Text", &field))
            .unwrap();
        let pos = terminal.get_cursor_position().unwrap();
        assert_eq!((pos.x, pos.y), (18, 1));
    }

    #[test]
    fn edit_updates_selected_task() {
        let mut app = App::new(Filter::All);
        add(&mut app, "Draft", "");
        app.table_state.select(Some(0));

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state, AppState::EditTask);
        type_text(&mut app, " v2");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.list.store().tasks()[0].text, "Draft v2");
        assert!(screen(&mut app).contains("Draft v2"));
    }
}
