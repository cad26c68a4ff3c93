//! Terminal lifecycle for the TUI screens.
//!
//! Raw mode and alternate screen setup/teardown around the event loops, so
//! the command layer never touches crossterm directly.

use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::tui::app::App;
use crate::tui::menu::MenuApp;

/// Run the task editor on a note file.
pub fn run_tui(path: &Path, config: &Config) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = App::new(path, config).and_then(|mut app| app.run(&mut terminal));
    restore_terminal(&mut terminal)?;
    result
}

/// Run the note picker menu until a choice is made.
pub fn run_menu(app: &mut MenuApp) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
