//! Enumerations and field vocabulary for task blocks.
//!
//! This module defines the structured value types shared by the parser and the
//! serializer: checkbox states, priorities, statuses and the metadata dialect,
//! plus the list filter/sort enums used by the CLI.

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Emoji glyph marking high priority on a checklist line.
pub const PRIORITY_HIGH_GLYPH: &str = "⏫";
/// Emoji glyph marking medium priority on a checklist line.
pub const PRIORITY_MEDIUM_GLYPH: &str = "🔼";
/// Emoji glyph marking low priority on a checklist line.
pub const PRIORITY_LOW_GLYPH: &str = "🔽";

/// The bracketed marker character of a checklist line.
///
/// `[-]` is preserved as a distinct state for diagnostics, but the serializer
/// only ever emits the binary pair `[ ]` / `[x]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CheckboxState {
    Open,
    Done,
    CancelledMark,
}

impl CheckboxState {
    /// Map a bracket character to its state. Unknown characters count as open.
    pub fn from_mark(c: char) -> Self {
        match c {
            'x' | 'X' => CheckboxState::Done,
            '-' => CheckboxState::CancelledMark,
            _ => CheckboxState::Open,
        }
    }
}

/// Priority classification, lowest to highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Priority {
    /// Parse a metadata value ("low" | "medium" | "high", any case).
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Canonical metadata value.
    pub fn as_keyword(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Reserved emoji glyph for the checklist line.
    pub fn glyph(self) -> &'static str {
        match self {
            Priority::Low => PRIORITY_LOW_GLYPH,
            Priority::Medium => PRIORITY_MEDIUM_GLYPH,
            Priority::High => PRIORITY_HIGH_GLYPH,
        }
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    #[serde(alias = "Todo", alias = "open")]
    Todo,
    #[serde(alias = "InProgress")]
    InProgress,
    #[serde(alias = "Done")]
    Done,
    #[serde(alias = "Cancelled", alias = "canceled")]
    Cancelled,
}

/// The "in progress" status keyword, hyphen or space spelling.
static IN_PROGRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bin[ -]progress\b").expect("valid status regex"));

impl Status {
    /// Keyword scan over a checklist line's text. An "in progress" token
    /// beats a "cancel" substring when both are present; `None` when neither
    /// appears. Shared vocabulary: the parser uses this to override the
    /// checkbox-derived status, the serializer to decide whether the main
    /// line alone would already imply the right status.
    pub fn scan_keywords(text: &str) -> Option<Status> {
        if IN_PROGRESS_RE.is_match(text) {
            Some(Status::InProgress)
        } else if text.to_lowercase().contains("cancel") {
            Some(Status::Cancelled)
        } else {
            None
        }
    }

    /// Parse a metadata value. Accepts the hyphen and space spellings of
    /// in-progress and both US/UK spellings of cancelled.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "open" => Some(Status::Todo),
            "in-progress" | "in progress" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            "cancelled" | "canceled" => Some(Status::Cancelled),
            _ => None,
        }
    }

    /// Canonical metadata value.
    pub fn as_keyword(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
            Status::Cancelled => "cancelled",
        }
    }
}

/// Metadata dialect used when serializing a task block.
///
/// The parser accepts both dialects unconditionally; a deployment picks one
/// for output via config.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `  key:: value`
    #[default]
    Inline,
    /// `  - Key: value`
    Bullet,
}

/// Available sorting options for task lists.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Line,
    Due,
    Priority,
}

/// Filtering options for tasks based on due dates.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DueFilter {
    Today,
    ThisWeek,
    Overdue,
    None,
}
