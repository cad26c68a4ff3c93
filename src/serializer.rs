//! Task block serializer.
//!
//! Converts a `TaskFields` payload into the canonical multi-line text block
//! for a task, independent of the parser. The contract is field-level
//! round-trip fidelity, not byte equality: the output always parses back to
//! a record with the same title, tags, priority, status, description,
//! created and due values.

use thiserror::Error;

use crate::fields::{Dialect, Status};
use crate::task::TaskFields;

/// Serialization failures. These are caller errors, never emitted blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("task payload has an empty title")]
    EmptyTitle,
}

/// Render a task block from a payload in the given metadata dialect.
///
/// The block has no trailing newline; the caller decides how to join it into
/// the surrounding document. Bracket glyphs are binary on output: `[x]` for
/// done, `[ ]` for everything else, with in-progress and cancelled carried by
/// a status metadata line.
pub fn serialize(fields: &TaskFields, dialect: Dialect) -> Result<String, SerializeError> {
    let title = fields.title.trim();
    if title.is_empty() {
        return Err(SerializeError::EmptyTitle);
    }

    let mark = if fields.status == Status::Done { 'x' } else { ' ' };
    let mut main = format!("- [{mark}] {title}");
    for tag in normalized_tags(&fields.tags) {
        main.push(' ');
        main.push_str(&tag);
    }
    if let Some(priority) = fields.priority {
        main.push(' ');
        main.push_str(priority.glyph());
    }

    let mut lines = vec![main];
    if let Some(description) = fields.description.as_deref() {
        // One keyed line per description line, so content that happens to
        // look like `word: rest` still round-trips.
        for text in description.lines() {
            lines.push(metadata_line(dialect, "description", text));
        }
    }
    if let Some(created) = fields.created.as_deref() {
        lines.push(metadata_line(dialect, "created", created));
    }
    if let Some(due) = fields.due.as_deref() {
        lines.push(metadata_line(dialect, "due", due));
    }
    // Emit a status line only when the main line alone would imply the
    // wrong status: todo/done are normally encoded by the checkbox, but a
    // title like "Cancel gym membership" trips the keyword scan and needs
    // an explicit override to survive a round trip.
    let checkbox_status = if mark == 'x' { Status::Done } else { Status::Todo };
    let implied = Status::scan_keywords(&lines[0]).unwrap_or(checkbox_status);
    if implied != fields.status {
        lines.push(metadata_line(dialect, "status", fields.status.as_keyword()));
    }

    Ok(lines.join("\n"))
}

/// Render one metadata line in the chosen dialect's canonical casing.
fn metadata_line(dialect: Dialect, key: &str, value: &str) -> String {
    match dialect {
        Dialect::Inline => format!("  {key}:: {value}"),
        Dialect::Bullet => format!("  - {}: {value}", capitalize(key)),
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Tags as emitted on the main line: `#`-prefixed, first-seen order,
/// duplicates collapsed, empties dropped.
fn normalized_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || tag == "#" {
            continue;
        }
        let token = if tag.starts_with('#') {
            tag.to_string()
        } else {
            format!("#{tag}")
        };
        if !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Priority, Status};
    use crate::parser::parse;

    fn full_payload() -> TaskFields {
        TaskFields {
            title: "Write the quarterly report".to_string(),
            tags: vec!["#work".to_string(), "#writing".to_string()],
            priority: Some(Priority::High),
            status: Status::InProgress,
            description: Some("gather the numbers first\nthen draft sections".to_string()),
            created: Some("2026-01-08".to_string()),
            due: Some("2026-01-20".to_string()),
        }
    }

    #[test]
    fn test_empty_title_is_rejected() {
        assert_eq!(
            serialize(&TaskFields::titled("   "), Dialect::Inline),
            Err(SerializeError::EmptyTitle)
        );
        assert_eq!(
            serialize(&TaskFields::default(), Dialect::Bullet),
            Err(SerializeError::EmptyTitle)
        );
    }

    #[test]
    fn test_minimal_block_is_a_single_line() {
        let block = serialize(&TaskFields::titled("Buy milk"), Dialect::Inline).unwrap();
        assert_eq!(block, "- [ ] Buy milk");
    }

    #[test]
    fn test_done_status_checks_the_box_without_a_status_line() {
        let mut fields = TaskFields::titled("Ship it");
        fields.status = Status::Done;
        let block = serialize(&fields, Dialect::Inline).unwrap();
        assert_eq!(block, "- [x] Ship it");
    }

    #[test]
    fn test_cancelled_status_keeps_box_open_and_adds_a_metadata_line() {
        let mut fields = TaskFields::titled("Old plan");
        fields.status = Status::Cancelled;
        let block = serialize(&fields, Dialect::Inline).unwrap();
        assert_eq!(block, "- [ ] Old plan\n  status:: cancelled");
    }

    #[test]
    fn test_inline_dialect_rendering() {
        let block = serialize(&full_payload(), Dialect::Inline).unwrap();
        let expected = "\
- [ ] Write the quarterly report #work #writing ⏫
  description:: gather the numbers first
  description:: then draft sections
  created:: 2026-01-08
  due:: 2026-01-20
  status:: in-progress";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_bullet_dialect_rendering() {
        let block = serialize(&full_payload(), Dialect::Bullet).unwrap();
        let expected = "\
- [ ] Write the quarterly report #work #writing ⏫
  - Description: gather the numbers first
  - Description: then draft sections
  - Created: 2026-01-08
  - Due: 2026-01-20
  - Status: in-progress";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_tags_gain_hash_prefix_and_dedup() {
        let mut fields = TaskFields::titled("Tidy");
        fields.tags = vec!["home".to_string(), "#home".to_string(), "errand".to_string()];
        let block = serialize(&fields, Dialect::Inline).unwrap();
        assert_eq!(block, "- [ ] Tidy #home #errand");
    }

    #[test]
    fn test_round_trip_both_dialects() {
        let fields = full_payload();
        for dialect in [Dialect::Inline, Dialect::Bullet] {
            let block = serialize(&fields, dialect).unwrap();
            let parsed = parse(&block);
            assert_eq!(parsed.len(), 1, "dialect {dialect:?}");
            let record = &parsed[0];
            assert_eq!(record.title, fields.title);
            assert_eq!(record.tags, fields.tags);
            assert_eq!(record.priority, fields.priority);
            assert_eq!(record.status, fields.status);
            assert_eq!(record.description, fields.description);
            assert_eq!(record.created, fields.created);
            assert_eq!(record.due, fields.due);
        }
    }

    #[test]
    fn test_round_trip_description_with_key_shaped_line() {
        let mut fields = TaskFields::titled("Call supplier");
        fields.description = Some("note: ask about lead times\nhttps://example.com/quote".to_string());
        let block = serialize(&fields, Dialect::Bullet).unwrap();
        let parsed = parse(&block);
        assert_eq!(parsed[0].description, fields.description);
    }

    #[test]
    fn test_keyword_bearing_title_round_trips_status() {
        let fields = TaskFields::titled("Cancel gym membership");
        let block = serialize(&fields, Dialect::Inline).unwrap();
        assert_eq!(block, "- [ ] Cancel gym membership\n  status:: todo");
        let record = &parse(&block)[0];
        assert_eq!(record.status, Status::Todo);
        assert_eq!(record.title, "Cancel gym membership");
    }

    #[test]
    fn test_idempotent_toggle() {
        let mut fields = full_payload();
        fields.status = Status::Done;
        let original = serialize(&fields, Dialect::Inline).unwrap();

        let mut reopened = TaskFields::from(&parse(&original)[0]);
        reopened.status = Status::Todo;
        let toggled = serialize(&reopened, Dialect::Inline).unwrap();
        assert!(toggled.starts_with("- [ ] "));

        let mut redone = TaskFields::from(&parse(&toggled)[0]);
        redone.status = Status::Done;
        let restored = serialize(&redone, Dialect::Inline).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_block_has_no_trailing_newline() {
        let block = serialize(&full_payload(), Dialect::Inline).unwrap();
        assert!(!block.ends_with('\n'));
    }
}
