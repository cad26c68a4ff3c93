//! # td - Plain-Text Task Manager
//!
//! A command-line task manager that keeps tasks as checklist blocks inside
//! ordinary markdown note files, with an optional terminal user interface
//! (TUI).
//!
//! ## Key Features
//!
//! - **Human-Editable Storage**: tasks are `- [ ]` checklist lines plus
//!   indented metadata, living in files you can open in any editor
//! - **Rich Task Metadata**: tags, priority, status, due and created dates,
//!   multi-line descriptions
//! - **Two Metadata Dialects**: `key:: value` inline fields or
//!   `- Key: value` bullets; the parser reads both, config picks the writer
//! - **Multiple Interfaces**: full CLI for automation + interactive TUI
//! - **Multi-Note Support**: keep as many note files as you like and pick
//!   one from the menu
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the note picker
//! td menu
//!
//! # Or open the TUI on the most recent note
//! td ui
//!
//! # Add a task via CLI
//! td add "Renew passport" --tag admin --due "in 2w" --priority high
//!
//! # List tasks
//! td list
//!
//! # Check it off
//! td complete "Renew passport"
//! ```
//!
//! Notes are stored in `~/.taskdown/` by default (configurable). Each note
//! is a plain markdown file; the task blocks inside it are the only lines
//! this tool will ever rewrite.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod doc;
pub mod fields;
pub mod parser;
pub mod serializer;
pub mod task;
pub mod vault;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod menu;
    pub mod run;
    pub mod task_form;
}

use cli::Cli;
use cmd::*;
use config::Config;
use vault::{get_most_recent_note, NoteFile};

fn main() {
    let cli = Cli::parse();
    let config = Config::load();

    // Determine the notes directory
    let notes_dir = if let Some(file) = cli.file.as_ref() {
        file.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        let dir = config.resolve_notes_dir();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Failed to create notes directory {}: {e}", dir.display());
            std::process::exit(1);
        }
        dir
    };

    // Commands that pick their own note
    match &cli.command {
        Commands::Menu => {
            cmd_menu(&notes_dir, &config);
            return;
        }
        Commands::Ui => {
            if let Some(file) = cli.file {
                cmd_ui(&file, &config);
            } else {
                // Open the most recent note, or fall back to the menu
                match get_most_recent_note(&notes_dir) {
                    Ok(Some(note)) => {
                        println!("Opening recent note: {}", note.display_name);
                        cmd_ui(&note.file_path, &config);
                    }
                    _ => cmd_menu(&notes_dir, &config),
                }
            }
            return;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    // Everything else operates on one note file
    let path = cli.file.unwrap_or_else(|| {
        match get_most_recent_note(&notes_dir) {
            Ok(Some(note)) => note.file_path,
            _ => {
                // First run: create a default inbox note
                let note = NoteFile::new("Inbox", &notes_dir);
                if let Err(e) = note.create_if_not_exists() {
                    eprintln!("Failed to create default note: {e}");
                    std::process::exit(1);
                }
                note.file_path
            }
        }
    });

    match cli.command {
        Commands::Ui | Commands::Menu | Commands::Completions { .. } => {
            unreachable!("handled above")
        }

        Commands::Add { title, tags, due, created, priority, status, desc } => {
            cmd_add(&path, &config, title, tags, due, created, priority, status, desc)
        }

        Commands::List { all, status, tags, due, sort, limit, json } => {
            cmd_list(&path, all, status, tags, due, sort, limit, json)
        }

        Commands::View { id } => cmd_view(&path, id),

        Commands::Update {
            id, title, desc, due, created, priority, status,
            add_tags, rm_tags, clear_due, clear_desc, clear_priority,
        } => cmd_update(
            &path, &config, id, title, desc, due, created, priority, status,
            add_tags, rm_tags, clear_due, clear_desc, clear_priority,
        ),

        Commands::Complete { id } => cmd_complete(&path, &config, id),

        Commands::Reopen { id } => cmd_reopen(&path, &config, id),

        Commands::Toggle { id } => cmd_toggle(&path, &config, id),

        Commands::Delete { id } => cmd_delete(&path, id),

        Commands::Tags => cmd_tags(&path),
    }
}
