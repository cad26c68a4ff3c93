//! Task record and payload structures.
//!
//! This module defines the `TaskRecord` struct produced by parsing a document
//! and the `TaskFields` payload consumed by the serializer. Records carry
//! exact line-range provenance; payloads carry only field content.

use serde::{Deserialize, Serialize};

use crate::fields::{CheckboxState, Priority, Status};

/// Title used when a checklist line strips down to nothing.
pub const UNTITLED: &str = "Untitled";

/// A task block parsed out of a document: one checklist line plus any
/// contiguous indented metadata lines.
///
/// Line indices are a snapshot of the exact text the record was parsed from;
/// any edit elsewhere in the document invalidates them until the next parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Index of the checklist line.
    pub start_line: usize,
    /// Index of the last metadata line, equal to `start_line` when the task
    /// has no metadata.
    pub end_line: usize,
    pub checkbox: CheckboxState,
    pub title: String,
    /// Tag tokens including their `#`, first-seen order, deduplicated.
    pub tags: Vec<String>,
    pub priority: Option<Priority>,
    pub status: Status,
    pub description: Option<String>,
    /// Creation date as written, `YYYY-MM-DD`. Opaque to the core.
    pub created: Option<String>,
    /// Due date as written, `YYYY-MM-DD`. Opaque to the core.
    pub due: Option<String>,
    /// Untouched source text of the checklist line, kept for diagnostics.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub raw_line: String,
}

impl TaskRecord {
    /// Number of source lines the block spans.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Field payload for serializing a task block. All fields except `title` are
/// optional; the serializer rejects an empty title rather than inventing one.
#[derive(Debug, Clone, Default)]
pub struct TaskFields {
    pub title: String,
    pub tags: Vec<String>,
    pub priority: Option<Priority>,
    pub status: Status,
    pub description: Option<String>,
    pub created: Option<String>,
    pub due: Option<String>,
}

impl TaskFields {
    /// Payload with just a title, everything else defaulted.
    pub fn titled(title: &str) -> Self {
        TaskFields {
            title: title.to_string(),
            ..TaskFields::default()
        }
    }
}

impl From<&TaskRecord> for TaskFields {
    fn from(record: &TaskRecord) -> Self {
        TaskFields {
            title: record.title.clone(),
            tags: record.tags.clone(),
            priority: record.priority,
            status: record.status,
            description: record.description.clone(),
            created: record.created.clone(),
            due: record.due.clone(),
        }
    }
}
