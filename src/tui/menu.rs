//! Retro-style main menu for note selection and management.
//!
//! This module provides a terminal-based menu for picking the note file to
//! edit, creating new notes, and viewing application information. It never
//! reads note content; it only deals in file names.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::tui::app::centered_rect;
use crate::vault::{create_note, discover_notes, NoteFile};

/// Note picker menu state.
pub struct MenuApp {
    notes_dir: std::path::PathBuf,
    state: MenuState,
    list_state: ListState,
    notes: Vec<NoteFile>,
    menu_items: Vec<String>,
    input_buffer: String,
    status_message: String,
    should_exit: bool,
    selected_note: Option<NoteFile>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuState {
    MainMenu,
    NoteList,
    NewNote,
    About,
}

impl MenuApp {
    /// Create a new menu over the given notes directory.
    pub fn new(notes_dir: std::path::PathBuf) -> Result<Self> {
        let notes = discover_notes(&notes_dir).unwrap_or_default();

        let menu_items = vec![
            "Open Note".to_string(),
            "New Note".to_string(),
            "About".to_string(),
            "Exit".to_string(),
        ];

        let mut app = MenuApp {
            notes_dir,
            state: MenuState::MainMenu,
            list_state: ListState::default(),
            notes,
            menu_items,
            input_buffer: String::new(),
            status_message: String::new(),
            should_exit: false,
            selected_note: None,
        };

        app.list_state.select(Some(0));
        Ok(app)
    }

    /// The note the user chose to open, if any.
    pub fn get_selected_note(&self) -> Option<&NoteFile> {
        self.selected_note.as_ref()
    }

    fn refresh_notes(&mut self) {
        self.notes = discover_notes(&self.notes_dir).unwrap_or_default();
    }

    fn handle_input(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.status_message.clear();

                match self.state {
                    MenuState::MainMenu => self.handle_main_menu_input(key.code),
                    MenuState::NoteList => self.handle_note_list_input(key.code),
                    MenuState::NewNote => self.handle_new_note_input(key.code),
                    MenuState::About => self.handle_about_input(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_main_menu_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(self.menu_items.len()),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(self.menu_items.len()),
            KeyCode::Enter => match self.list_state.selected() {
                Some(0) => {
                    self.refresh_notes();
                    if self.notes.is_empty() {
                        self.status_message = "No notes yet - create one first".to_string();
                    } else {
                        self.state = MenuState::NoteList;
                        self.list_state.select(Some(0));
                    }
                }
                Some(1) => {
                    self.input_buffer.clear();
                    self.state = MenuState::NewNote;
                }
                Some(2) => self.state = MenuState::About,
                Some(3) => self.should_exit = true,
                _ => {}
            },
            KeyCode::Esc | KeyCode::Char('q') => self.should_exit = true,
            _ => {}
        }
    }

    fn handle_note_list_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(self.notes.len()),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(self.notes.len()),
            KeyCode::Enter => {
                if let Some(i) = self.list_state.selected() {
                    if let Some(note) = self.notes.get(i) {
                        self.selected_note = Some(note.clone());
                        self.should_exit = true;
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state = MenuState::MainMenu;
                self.list_state.select(Some(0));
            }
            _ => {}
        }
    }

    fn handle_new_note_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => match create_note(&self.input_buffer, &self.notes_dir) {
                Ok(note) => {
                    self.selected_note = Some(note);
                    self.should_exit = true;
                }
                Err(e) => self.status_message = e.to_string(),
            },
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Esc => {
                self.input_buffer.clear();
                self.state = MenuState::MainMenu;
            }
            _ => {}
        }
    }

    fn handle_about_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.state = MenuState::MainMenu;
        }
    }

    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let previous = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.list_state.select(Some(previous));
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            MenuState::MainMenu => self.render_main_menu(f, chunks[0]),
            MenuState::NoteList => self.render_note_list(f, chunks[0]),
            MenuState::NewNote => {
                self.render_main_menu(f, chunks[0]);
                self.render_new_note(f, chunks[0]);
            }
            MenuState::About => self.render_about(f, chunks[0]),
        }

        let bar = Paragraph::new(self.status_message.clone())
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(bar, chunks[1]);
    }

    fn render_main_menu(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let banner = Paragraph::new(vec![
            Line::from("TASKDOWN"),
            Line::from("plain-text tasks, one note at a time"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, chunks[0]);

        let items: Vec<ListItem> = self
            .menu_items
            .iter()
            .map(|item| ListItem::new(item.clone()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Main Menu"))
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    fn render_note_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .notes
            .iter()
            .map(|note| ListItem::new(note.display_name.clone()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Open Note ({}) - Enter opens, Esc goes back",
                self.notes.len()
            )))
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_new_note(&mut self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, 20, area);
        f.render_widget(Clear, popup);

        let input = Paragraph::new(format!("{}▌", self.input_buffer))
            .block(Block::default().borders(Borders::ALL)
                .title("New Note Name - Enter creates, Esc cancels"));
        f.render_widget(input, popup);
    }

    fn render_about(&mut self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from("taskdown"),
            Line::from(""),
            Line::from("Tasks are markdown checklist blocks inside plain note"),
            Line::from("files: a `- [ ]` line plus indented metadata lines."),
            Line::from("Edit them here or in any text editor you like."),
            Line::from(""),
            Line::from("Press Esc to go back."),
        ];
        let about = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("About"))
            .wrap(Wrap { trim: false });
        f.render_widget(about, area);
    }

    /// Run the menu loop until the user opens a note or exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            self.handle_input()?;
            if self.should_exit {
                break;
            }
        }
        Ok(())
    }
}
