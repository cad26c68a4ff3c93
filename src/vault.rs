//! Notes-directory discovery for multi-document support.
//!
//! This module handles finding, naming and creating the plain-text note
//! files that hold task blocks. Notes are ordinary `*.md` files inside the
//! taskdown directory; nothing here reads their content.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// A note file: its filesystem name plus a human-facing display name.
#[derive(Debug, Clone)]
pub struct NoteFile {
    pub name: String,
    pub display_name: String,
    pub file_path: PathBuf,
}

impl NoteFile {
    /// Create a note handle with the given display name.
    pub fn new(display_name: &str, notes_dir: &Path) -> Self {
        let name = sanitize_note_name(display_name);
        let file_path = notes_dir.join(format!("{name}.md"));

        NoteFile {
            name,
            display_name: display_name.to_string(),
            file_path,
        }
    }

    /// Recognise an existing file as a note. Only `*.md` files qualify.
    pub fn from_file(file_path: PathBuf) -> Option<Self> {
        if file_path.extension()?.to_str()? != "md" {
            return None;
        }
        let name = file_path.file_stem()?.to_str()?.to_string();
        let display_name = name.replace('_', " ");

        Some(NoteFile {
            name,
            display_name,
            file_path,
        })
    }

    /// Create the file on disk if it doesn't exist yet.
    pub fn create_if_not_exists(&self) -> std::io::Result<()> {
        if !self.file_path.exists() {
            fs::write(&self.file_path, "")?;
        }
        Ok(())
    }
}

/// Convert a display name to a safe file stem: lowercase, alphanumerics
/// kept, everything else collapsed to single underscores.
pub fn sanitize_note_name(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Discover all note files in the notes directory, sorted by display name.
pub fn discover_notes(notes_dir: &Path) -> std::io::Result<Vec<NoteFile>> {
    let mut notes = Vec::new();

    if !notes_dir.exists() {
        return Ok(notes);
    }

    for entry in fs::read_dir(notes_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if let Some(note) = NoteFile::from_file(path) {
                notes.push(note);
            }
        }
    }

    notes.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(notes)
}

/// Create a new note with the given name, refusing blanks and duplicates.
pub fn create_note(display_name: &str, notes_dir: &Path) -> Result<NoteFile> {
    if display_name.trim().is_empty() {
        bail!("Note name cannot be empty");
    }

    let note = NoteFile::new(display_name, notes_dir);
    if note.file_path.exists() {
        bail!("Note '{}' already exists", display_name);
    }

    note.create_if_not_exists()?;
    Ok(note)
}

/// Find the most recently modified note in the notes directory.
pub fn get_most_recent_note(notes_dir: &Path) -> std::io::Result<Option<NoteFile>> {
    let notes = discover_notes(notes_dir)?;

    let mut most_recent: Option<(NoteFile, std::time::SystemTime)> = None;
    for note in notes {
        if let Ok(modified) = fs::metadata(&note.file_path).and_then(|m| m.modified()) {
            let newer = match &most_recent {
                None => true,
                Some((_, current)) => modified > *current,
            };
            if newer {
                most_recent = Some((note, modified));
            }
        }
    }

    Ok(most_recent.map(|(note, _)| note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_note_name() {
        assert_eq!(sanitize_note_name("Weekly Plan"), "weekly_plan");
        assert_eq!(sanitize_note_name("Q1-Goals_2026"), "q1_goals_2026");
        assert_eq!(sanitize_note_name("Inbox!!!"), "inbox");
        assert_eq!(sanitize_note_name("  spaced   out  "), "spaced_out");
        assert_eq!(sanitize_note_name(""), "");
    }

    #[test]
    fn test_from_file_only_accepts_markdown() {
        assert!(NoteFile::from_file(PathBuf::from("/tmp/weekly_plan.md")).is_some());
        assert!(NoteFile::from_file(PathBuf::from("/tmp/tasks.json")).is_none());
        assert!(NoteFile::from_file(PathBuf::from("/tmp/no_extension")).is_none());
    }

    #[test]
    fn test_from_file_display_name() {
        let note = NoteFile::from_file(PathBuf::from("/tmp/weekly_plan.md")).unwrap();
        assert_eq!(note.name, "weekly_plan");
        assert_eq!(note.display_name, "weekly plan");
    }
}
