//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates between the
//! task list, detail view, add/edit forms and the delete confirmation.
//!
//! Every mutation follows the read-modify-write discipline of the core:
//! build a payload, serialize it, splice the block into the document, save,
//! then re-parse. Line ranges are never reused across an edit.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::cmd::{format_due_relative, status_glyph, truncate};
use crate::config::Config;
use crate::doc::Document;
use crate::fields::{Priority, Status};
use crate::parser::parse;
use crate::serializer::serialize;
use crate::task::{TaskFields, TaskRecord};
use crate::tui::{
    colors::{AMBER, HIGH_RED, SEA_GREEN, STEEL_BLUE},
    enums::{AppState, InputMode},
    task_form::{TaskForm, CREATED_ORDER, DESCRIPTION_ORDER, DUE_ORDER, PRIORITY_ORDER,
                STATUS_ORDER, TAGS_ORDER, TITLE_ORDER},
};

/// Main application state for the terminal user interface.
///
/// Holds the parsed records of one note file plus the view state: current
/// screen, selection, filter and the add/edit form.
pub struct App {
    state: AppState,
    doc_path: PathBuf,
    config: Config,
    records: Vec<TaskRecord>,
    visible: Vec<usize>,
    table_state: TableState,
    task_form: TaskForm,
    editing_index: Option<usize>,
    input_mode: InputMode,
    status_message: String,
    show_completed: bool,
    filter_text: String,
    filter_active: bool,
    confirm_delete: Option<usize>,
}

impl App {
    /// Create a new App on a note file, parsing it immediately.
    pub fn new(doc_path: &Path, config: &Config) -> Result<Self> {
        let mut app = App {
            state: AppState::TaskList,
            doc_path: doc_path.to_path_buf(),
            config: config.clone(),
            records: Vec::new(),
            visible: Vec::new(),
            table_state: TableState::default(),
            task_form: TaskForm::new(config),
            editing_index: None,
            input_mode: InputMode::None,
            status_message: String::new(),
            show_completed: config.show_completed,
            filter_text: String::new(),
            filter_active: false,
            confirm_delete: None,
        };
        app.reload()?;
        Ok(app)
    }

    /// Re-read the document and re-parse. All previous line ranges die here.
    fn reload(&mut self) -> Result<()> {
        let doc = Document::load(&self.doc_path)?;
        self.records = parse(&doc.text());
        self.update_visible();
        Ok(())
    }

    /// Recompute the visible rows from the filter and completed toggle.
    fn update_visible(&mut self) {
        let needle = self.filter_text.to_lowercase();
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                if !self.show_completed && matches!(t.status, Status::Done | Status::Cancelled) {
                    return false;
                }
                if needle.is_empty() {
                    return true;
                }
                t.title.to_lowercase().contains(&needle)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect();

        match self.table_state.selected() {
            Some(s) if s < self.visible.len() => {}
            _ => {
                let select = if self.visible.is_empty() { None } else { Some(0) };
                self.table_state.select(select);
            }
        }
    }

    fn selected_record(&self) -> Option<&TaskRecord> {
        let row = self.table_state.selected()?;
        let index = *self.visible.get(row)?;
        self.records.get(index)
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    // ---- mutations ----

    /// Serialize a payload and append it to the end of the document.
    fn add_task(&mut self, fields: &TaskFields) -> Result<()> {
        let block = serialize(fields, self.config.dialect)?;
        let mut doc = Document::load(&self.doc_path)?;
        doc.append_block(&block);
        doc.save()?;
        self.reload()
    }

    /// Serialize a payload and splice it over an existing record's span.
    fn rewrite_task(&mut self, record: &TaskRecord, fields: &TaskFields) -> Result<()> {
        let block = serialize(fields, self.config.dialect)?;
        let mut doc = Document::load(&self.doc_path)?;
        doc.replace_block(record.start_line, record.end_line, &block);
        doc.save()?;
        self.reload()
    }

    /// Remove a record's whole line span from the document.
    fn delete_task(&mut self, record: &TaskRecord) -> Result<()> {
        let mut doc = Document::load(&self.doc_path)?;
        doc.delete_block(record.start_line, record.end_line);
        doc.save()?;
        self.reload()
    }

    /// Toggle the selected task's checkbox between done and todo.
    fn toggle_selected(&mut self) {
        let Some(record) = self.selected_record().cloned() else {
            return;
        };
        let mut fields = TaskFields::from(&record);
        fields.status = if record.status == Status::Done {
            Status::Todo
        } else {
            Status::Done
        };
        let verb = if fields.status == Status::Done { "Checked" } else { "Unchecked" };
        match self.rewrite_task(&record, &fields) {
            Ok(()) => self.set_status_message(format!("{verb}: {}", record.title)),
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn submit_form(&mut self, is_edit: bool) {
        let fields = match self.task_form.to_payload() {
            Ok(fields) => fields,
            Err(msg) => {
                self.set_status_message(msg);
                return;
            }
        };

        let result = if is_edit {
            match self.editing_index.and_then(|i| self.records.get(i)).cloned() {
                Some(record) => self.rewrite_task(&record, &fields),
                None => {
                    self.set_status_message("Task vanished; reload and retry".to_string());
                    self.state = AppState::TaskList;
                    return;
                }
            }
        } else {
            self.add_task(&fields)
        };

        match result {
            Ok(()) => {
                let verb = if is_edit { "Updated" } else { "Added" };
                self.set_status_message(format!("{verb}: {}", fields.title));
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
            }
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    // ---- input handling ----

    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
        if self.filter_active {
            match key {
                KeyCode::Esc => {
                    self.filter_active = false;
                    self.filter_text.clear();
                    self.input_mode = InputMode::None;
                    self.update_visible();
                }
                KeyCode::Enter => {
                    self.filter_active = false;
                    self.input_mode = InputMode::None;
                    self.set_status_message(format!(
                        "Filter: '{}' ({} tasks)",
                        self.filter_text,
                        self.visible.len()
                    ));
                }
                KeyCode::Backspace => {
                    self.filter_text.pop();
                    self.update_visible();
                }
                KeyCode::Char(c) => {
                    self.filter_text.push(c);
                    self.update_visible();
                }
                _ => {}
            }
            return Ok(false);
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if self.filter_text.is_empty() {
                    return Ok(true);
                }
                self.filter_text.clear();
                self.update_visible();
            }

            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('g') => {
                if !self.visible.is_empty() {
                    self.table_state.select(Some(0));
                }
            }
            KeyCode::Char('G') => {
                if !self.visible.is_empty() {
                    self.table_state.select(Some(self.visible.len() - 1));
                }
            }

            KeyCode::Char(' ') => self.toggle_selected(),

            KeyCode::Char('a') => {
                self.task_form = TaskForm::new(&self.config);
                self.input_mode = InputMode::Text;
                self.state = AppState::AddTask;
            }
            KeyCode::Char('e') => {
                if let Some(row) = self.table_state.selected() {
                    if let Some(&index) = self.visible.get(row) {
                        self.task_form = TaskForm::from_record(&self.records[index], &self.config);
                        self.editing_index = Some(index);
                        self.input_mode = InputMode::Text;
                        self.state = AppState::EditTask;
                    }
                }
            }
            KeyCode::Enter => {
                if self.selected_record().is_some() {
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.table_state.selected() {
                    if let Some(&index) = self.visible.get(row) {
                        self.confirm_delete = Some(index);
                        self.state = AppState::Confirm;
                    }
                }
            }

            KeyCode::Char('c') => {
                self.show_completed = !self.show_completed;
                self.update_visible();
            }
            KeyCode::Char('/') => {
                self.filter_active = true;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('r') => {
                if let Err(e) = self.reload() {
                    self.set_status_message(format!("Reload failed: {e}"));
                } else {
                    self.set_status_message("Reloaded".to_string());
                }
            }
            KeyCode::Char('?') | KeyCode::Char('h') => self.state = AppState::Help,
            _ => {}
        }
        Ok(false)
    }

    fn move_selection(&mut self, delta: i64) {
        if self.visible.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i64;
        let last = self.visible.len() as i64 - 1;
        let next = (current + delta).clamp(0, last);
        self.table_state.select(Some(next as usize));
    }

    fn handle_detail_input(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.state = AppState::TaskList,
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('e') => {
                if let Some(row) = self.table_state.selected() {
                    if let Some(&index) = self.visible.get(row) {
                        self.task_form = TaskForm::from_record(&self.records[index], &self.config);
                        self.editing_index = Some(index);
                        self.input_mode = InputMode::Text;
                        self.state = AppState::EditTask;
                    }
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers, is_edit: bool) -> Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
            }
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit_form(is_edit);
            }
            KeyCode::Enter => self.submit_form(is_edit),
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Home => self.task_form.handle_home(),
            KeyCode::End => self.task_form.handle_end(),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    fn handle_confirm_input(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(record) = self.confirm_delete.and_then(|i| self.records.get(i)).cloned() {
                    match self.delete_task(&record) {
                        Ok(()) => self.set_status_message(format!("Deleted: {}", record.title)),
                        Err(e) => self.set_status_message(format!("Error: {e}")),
                    }
                }
                self.confirm_delete = None;
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Poll for and handle keyboard events based on current application
    /// state. Returns true if the application should quit.
    fn handle_input(&mut self) -> Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.status_message.clear();

                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers)?,
                    AppState::TaskDetail => self.handle_detail_input(key.code)?,
                    AppState::AddTask => self.handle_form_input(key.code, key.modifiers, false)?,
                    AppState::EditTask => self.handle_form_input(key.code, key.modifiers, true)?,
                    AppState::Help => self.handle_help_input(key.code)?,
                    AppState::Confirm => self.handle_confirm_input(key.code)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    // ---- rendering ----

    fn note_name(&self) -> String {
        self.doc_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("note")
            .replace('_', " ")
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let filter_display = if self.filter_active || !self.filter_text.is_empty() {
            format!("  Filter: {}▌", self.filter_text)
        } else {
            String::new()
        };
        let header_text = vec![Line::from(vec![
            Span::styled("TASKDOWN", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Note: {}{}", self.note_name(), filter_display),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let header_cells = ["#", "St", "Pri", "Due", "Title"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(STEEL_BLUE).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&index| self.records.get(index).map(|t| (index, t)))
            .map(|(index, task)| {
                let tags_str = if task.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", task.tags.join(" "))
                };

                let row_style = match task.status {
                    Status::Done | Status::Cancelled => Style::default().fg(Color::DarkGray),
                    Status::InProgress => Style::default().fg(SEA_GREEN).add_modifier(Modifier::BOLD),
                    Status::Todo => Style::default().fg(Color::White),
                };

                let pri_cell = match task.priority {
                    Some(Priority::High) => Cell::from("high").style(Style::default().fg(HIGH_RED)),
                    Some(Priority::Medium) => Cell::from("med").style(Style::default().fg(AMBER)),
                    Some(Priority::Low) => Cell::from("low").style(Style::default().fg(STEEL_BLUE)),
                    None => Cell::from("-"),
                };

                Row::new(vec![
                    Cell::from((index + 1).to_string()),
                    Cell::from(status_glyph(task.status)),
                    pri_cell,
                    Cell::from(format_due_relative(task.due.as_deref(), today)),
                    Cell::from(format!("{}{}", truncate(&task.title, 60), tags_str)),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Min(25),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - press '?' for help",
                self.visible.len(),
                self.records.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.table_state);
    }

    fn render_task_detail(&mut self, f: &mut Frame, area: Rect) {
        let Some(task) = self.selected_record() else {
            self.state = AppState::TaskList;
            return;
        };
        let today = Local::now().date_naive();

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Title:     ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.title.clone()),
            ]),
            Line::from(vec![
                Span::styled("Status:    ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.status.as_keyword()),
            ]),
            Line::from(vec![
                Span::styled("Priority:  ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.priority.map_or("-", |p| p.as_keyword())),
            ]),
            Line::from(vec![
                Span::styled("Tags:      ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(if task.tags.is_empty() { "-".into() } else { task.tags.join(" ") }),
            ]),
            Line::from(vec![
                Span::styled("Due:       ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(match task.due.as_deref() {
                    Some(d) => format!("{d} ({})", format_due_relative(Some(d), today)),
                    None => "-".into(),
                }),
            ]),
            Line::from(vec![
                Span::styled("Created:   ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.created.as_deref().unwrap_or("-").to_string()),
            ]),
            Line::from(vec![
                Span::styled("Lines:     ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{}-{}", task.start_line + 1, task.end_line + 1)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Description:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        match task.description.as_deref() {
            Some(desc) => lines.extend(desc.lines().map(|l| Line::from(l.to_string()))),
            None => lines.push(Line::from("-")),
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("source: {}", task.raw_line),
            Style::default().fg(Color::DarkGray),
        )));

        let detail = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Task Detail - Esc to go back"))
            .wrap(Wrap { trim: false });
        f.render_widget(detail, area);
    }

    fn render_task_form(&mut self, f: &mut Frame, area: Rect, is_edit: bool) {
        let title = if is_edit { "Edit Task" } else { "Add Task" };
        let popup = centered_rect(70, 90, area);
        f.render_widget(Clear, popup);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(format!("{title} - Enter saves, Esc cancels"));
        let inner = outer.inner(popup);
        f.render_widget(outer, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title
                Constraint::Length(3), // tags
                Constraint::Length(3), // due
                Constraint::Length(3), // created
                Constraint::Length(3), // description
                Constraint::Length(3), // priority
                Constraint::Length(3), // status
                Constraint::Min(0),
            ])
            .split(inner);

        let text_fields = [
            (TITLE_ORDER, "Title", &self.task_form.title),
            (TAGS_ORDER, "Tags (comma-separated)", &self.task_form.tags),
            (DUE_ORDER, "Due (YYYY-MM-DD / today / in 3d)", &self.task_form.due),
            (CREATED_ORDER, "Created (YYYY-MM-DD)", &self.task_form.created),
            (DESCRIPTION_ORDER, "Description", &self.task_form.description),
        ];
        for (order, label, field) in text_fields {
            let style = if self.task_form.current_field == order {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let widget = Paragraph::new(field.value.clone())
                .style(style)
                .block(Block::default().borders(Borders::ALL).title(label));
            f.render_widget(widget, chunks[order]);

            if self.task_form.current_field == order {
                let x = chunks[order].x + 1 + field.cursor as u16;
                let y = chunks[order].y + 1;
                f.set_cursor_position((x.min(chunks[order].right().saturating_sub(2)), y));
            }
        }

        let selector = |label: &str, value: String, active: bool| {
            let style = if active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Paragraph::new(format!("< {value} >"))
                .style(style)
                .block(Block::default().borders(Borders::ALL).title(label.to_string()))
        };

        let priority_value = self.task_form.priorities[self.task_form.priority]
            .map_or("none".to_string(), |p| p.as_keyword().to_string());
        f.render_widget(
            selector("Priority (←/→)", priority_value, self.task_form.current_field == PRIORITY_ORDER),
            chunks[PRIORITY_ORDER],
        );

        let status_value = self.task_form.statuses[self.task_form.status].as_keyword().to_string();
        f.render_widget(
            selector("Status (←/→)", status_value, self.task_form.current_field == STATUS_ORDER),
            chunks[STATUS_ORDER],
        );
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("  j/k, ↑/↓    move selection"),
            Line::from("  g/G         first/last task"),
            Line::from("  space       toggle checkbox (done <-> todo)"),
            Line::from("  enter       task detail"),
            Line::from("  a           add task"),
            Line::from("  e           edit task"),
            Line::from("  d           delete task (with confirmation)"),
            Line::from("  /           filter by title or tag"),
            Line::from("  c           show/hide completed tasks"),
            Line::from("  r           re-read the note from disk"),
            Line::from("  q, esc      quit"),
            Line::from(""),
            Line::from("In forms: tab/↓ next field, shift-tab/↑ previous,"),
            Line::from("←/→ cycle selectors, enter or ctrl-s saves."),
            Line::from(""),
            Line::from("Tasks are plain markdown checklist blocks; edit the"),
            Line::from("note in any editor and press 'r' to pick up changes."),
        ];
        let help = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help - Esc to go back"))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let title = self
            .confirm_delete
            .and_then(|i| self.records.get(i))
            .map_or(String::new(), |t| t.title.clone());

        let popup = centered_rect(50, 20, area);
        f.render_widget(Clear, popup);
        let text = vec![
            Line::from(""),
            Line::from(format!("Delete '{}'?", truncate(&title, 40))),
            Line::from(""),
            Line::from("y / Enter to delete, n / Esc to cancel"),
        ];
        let confirm = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Confirm Delete")
                .border_style(Style::default().fg(HIGH_RED)));
        f.render_widget(confirm, popup);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            match self.state {
                AppState::TaskList if self.input_mode == InputMode::Text => {
                    "typing filter - Enter applies, Esc clears".to_string()
                }
                AppState::TaskList => {
                    "a:add  e:edit  d:delete  space:toggle  /:filter  ?:help  q:quit".to_string()
                }
                _ => String::new(),
            }
        } else {
            self.status_message.clone()
        };
        let bar = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
        f.render_widget(bar, area);
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::TaskDetail => self.render_task_detail(f, chunks[0]),
            AppState::AddTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0], false);
            }
            AppState::EditTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0], true);
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
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// A centered rect occupying the given percentages of the outer area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
