//! Task block parser.
//!
//! Scans a document's text in a single left-to-right pass and produces an
//! ordered sequence of `TaskRecord`s with exact line-range provenance. The
//! parser is pure and lenient: lines that do not match the expected shapes
//! are skipped or end the current metadata block, never raised as errors.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{CheckboxState, Priority, Status};
use crate::task::{TaskRecord, UNTITLED};

/// A checklist line: optional leading whitespace, a `-` list marker, a
/// bracketed single character, then the remainder of the line.
static CHECKLIST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-\s*\[([ xX-])\]\s*(.*)$").expect("valid checklist regex"));

/// Tag tokens: `#` followed by letters, digits, `/`, `_`, `-`.
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[A-Za-z0-9/_-]+").expect("valid tag regex"));

/// Textual priority markers, one per level, in the `priority: X` / `P:X`
/// spellings. Checked high to low; first match wins.
static PRIORITY_MARKERS: Lazy<[(Priority, Regex); 3]> = Lazy::new(|| {
    let marker = |level: &str| {
        Regex::new(&format!(r"(?i)\b(?:priority|p)\s*:\s*{level}\b")).expect("valid priority regex")
    };
    [
        (Priority::High, marker("high")),
        (Priority::Medium, marker("medium")),
        (Priority::Low, marker("low")),
    ]
});

/// Trailing status keyword tokens to strip from titles.
static TRAILING_STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:\s*(?:in[ -]progress|cancel\w*))+\s*$").expect("valid status regex"));

/// Leading `word:` / `word::` key prefix on a metadata line.
static META_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*)::?\s*(.*)$").expect("valid key regex"));

/// Parse the full text of a document into task records, in document order.
///
/// Never fails: malformed lines are simply not claimed by any task.
pub fn parse(text: &str) -> Vec<TaskRecord> {
    let lines: Vec<&str> = text.lines().collect();
    let mut records = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let Some(caps) = CHECKLIST_RE.captures(lines[i]) else {
            i += 1;
            continue;
        };
        let mark = caps
            .get(1)
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or(' ');
        let rest = caps.get(2).map_or("", |m| m.as_str());

        let mut record = TaskRecord {
            start_line: i,
            end_line: i,
            checkbox: CheckboxState::from_mark(mark),
            title: extract_title(rest),
            tags: extract_tags(rest),
            priority: detect_priority(rest),
            status: derive_status(mark, rest),
            description: None,
            created: None,
            due: None,
            raw_line: lines[i].to_string(),
        };

        let mut j = i + 1;
        while j < lines.len() && is_metadata_line(lines[j]) {
            consume_metadata_line(lines[j], &mut record);
            record.end_line = j;
            j += 1;
        }

        records.push(record);
        i = j;
    }

    records
}

/// Collect tag tokens in first-seen order, collapsing duplicates.
fn extract_tags(rest: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for m in TAG_RE.find_iter(rest) {
        if !tags.iter().any(|t| t == m.as_str()) {
            tags.push(m.as_str().to_string());
        }
    }
    tags
}

/// Detect a priority marker, checking High then Medium then Low. At most one
/// priority is ever assigned.
fn detect_priority(rest: &str) -> Option<Priority> {
    for (priority, marker) in PRIORITY_MARKERS.iter() {
        if rest.contains(priority.glyph()) || marker.is_match(rest) {
            return Some(*priority);
        }
    }
    None
}

/// Derive status from the bracket character, then let the keyword scan
/// override it. The keyword scan always beats the checkbox.
fn derive_status(mark: char, rest: &str) -> Status {
    let from_mark = match mark {
        'x' | 'X' => Status::Done,
        _ => Status::Todo,
    };
    Status::scan_keywords(rest).unwrap_or(from_mark)
}

/// Strip tag tokens, priority markers and trailing status keywords from the
/// remainder, collapse whitespace, and fall back to the placeholder when
/// nothing is left.
fn extract_title(rest: &str) -> String {
    let mut text = TAG_RE.replace_all(rest, " ").into_owned();
    for (priority, marker) in PRIORITY_MARKERS.iter() {
        text = text.replace(priority.glyph(), " ");
        text = marker.replace_all(&text, " ").into_owned();
    }
    text = TRAILING_STATUS_RE.replace(&text, "").into_owned();

    let title = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

/// A metadata candidate: indented by at least two spaces, not blank, and not
/// itself a checklist line (an indented task starts a new block).
fn is_metadata_line(line: &str) -> bool {
    line.starts_with("  ") && !line.trim().is_empty() && !CHECKLIST_RE.is_match(line)
}

/// Consume one metadata line into the record. Both dialects are accepted:
/// `key:: value` inline fields and `- Key: value` bullets; a line with no
/// recognisable key extends the description instead.
fn consume_metadata_line(line: &str, record: &mut TaskRecord) {
    let content = line.trim_start();
    let body = content.strip_prefix("- ").unwrap_or(content);

    match META_KEY_RE.captures(body) {
        Some(caps) => {
            let key = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            apply_field(&key, value, record);
        }
        None => push_description(record, body.trim_end()),
    }
}

/// Route a recognised key to its record field. Unrecognised keys are dropped;
/// invalid priority/status values leave the derived value in place.
fn apply_field(key: &str, value: &str, record: &mut TaskRecord) {
    match key {
        "created" => record.created = Some(value.to_string()),
        "due" => record.due = Some(value.to_string()),
        "priority" => {
            if let Some(p) = Priority::from_keyword(value) {
                record.priority = Some(p);
            }
        }
        "status" => {
            if let Some(s) = Status::from_keyword(value) {
                record.status = s;
            }
        }
        "description" => push_description(record, value),
        _ => {}
    }
}

fn push_description(record: &mut TaskRecord, text: &str) {
    match &mut record.description {
        Some(d) => {
            d.push('\n');
            d.push_str(text);
        }
        None => record.description = Some(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_checklist_line() {
        let tasks = parse("- [ ] Buy milk");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].status, Status::Todo);
        assert_eq!(tasks[0].checkbox, CheckboxState::Open);
        assert_eq!(tasks[0].start_line, 0);
        assert_eq!(tasks[0].end_line, 0);
        assert_eq!(tasks[0].raw_line, "- [ ] Buy milk");
    }

    #[test]
    fn test_checked_box_derives_done() {
        let tasks = parse("- [x] Ship release\n- [X] Tag release");
        assert_eq!(tasks[0].status, Status::Done);
        assert_eq!(tasks[1].status, Status::Done);
        assert_eq!(tasks[0].checkbox, CheckboxState::Done);
    }

    #[test]
    fn test_cancelled_mark_is_recorded_but_status_stays_todo() {
        let tasks = parse("- [-] Old idea");
        assert_eq!(tasks[0].checkbox, CheckboxState::CancelledMark);
        assert_eq!(tasks[0].status, Status::Todo);
    }

    #[test]
    fn test_non_task_lines_are_skipped() {
        let text = "# Heading\n\nSome prose.\n- [ ] Real task\n* not a task marker\n";
        let tasks = parse(text);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].start_line, 3);
    }

    #[test]
    fn test_tag_dedup_preserves_first_seen_order() {
        let tasks = parse("- [ ] Buy milk #home #home #errand");
        assert_eq!(tasks[0].tags, vec!["#home", "#errand"]);
        assert_eq!(tasks[0].title, "Buy milk");
    }

    #[test]
    fn test_priority_from_emoji_glyph() {
        let tasks = parse("- [ ] Fix login ⏫\n- [ ] Tidy docs 🔽\n- [ ] Review PR 🔼");
        assert_eq!(tasks[0].priority, Some(Priority::High));
        assert_eq!(tasks[1].priority, Some(Priority::Low));
        assert_eq!(tasks[2].priority, Some(Priority::Medium));
        assert_eq!(tasks[0].title, "Fix login");
    }

    #[test]
    fn test_priority_from_textual_marker() {
        let tasks = parse("- [ ] Fix login priority: high\n- [ ] Tidy docs P:low");
        assert_eq!(tasks[0].priority, Some(Priority::High));
        assert_eq!(tasks[0].title, "Fix login");
        assert_eq!(tasks[1].priority, Some(Priority::Low));
        assert_eq!(tasks[1].title, "Tidy docs");
    }

    #[test]
    fn test_high_priority_wins_when_multiple_markers_present() {
        let tasks = parse("- [ ] Everything at once 🔽 ⏫");
        assert_eq!(tasks[0].priority, Some(Priority::High));
    }

    #[test]
    fn test_in_progress_keyword_overrides_checked_box() {
        let tasks = parse("- [x] Finish report #cancelled-ish in progress");
        assert_eq!(tasks[0].status, Status::InProgress);
        assert_eq!(tasks[0].title, "Finish report");
    }

    #[test]
    fn test_cancel_substring_overrides_checkbox() {
        let tasks = parse("- [x] Order cancelled");
        assert_eq!(tasks[0].status, Status::Cancelled);
    }

    #[test]
    fn test_empty_title_falls_back_to_placeholder() {
        let tasks = parse("- [ ] #urgent");
        assert_eq!(tasks[0].title, UNTITLED);
        assert_eq!(tasks[0].tags, vec!["#urgent"]);
    }

    #[test]
    fn test_metadata_block_boundary() {
        let text = "- [ ] Write spec\n  created:: 2026-01-08\n  due:: 2026-01-10\nNot a task line.";
        let tasks = parse(text);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].start_line, 0);
        assert_eq!(tasks[0].end_line, 2);
        assert_eq!(tasks[0].created.as_deref(), Some("2026-01-08"));
        assert_eq!(tasks[0].due.as_deref(), Some("2026-01-10"));
        assert_eq!(tasks[0].description, None);
    }

    #[test]
    fn test_blank_line_ends_metadata_block() {
        let text = "- [ ] A\n  due:: 2026-02-01\n\n  orphan indented line";
        let tasks = parse(text);
        assert_eq!(tasks[0].end_line, 1);
    }

    #[test]
    fn test_bullet_dialect_metadata() {
        let text = "- [ ] Plan sprint\n  - Created: 2026-03-01\n  - Status: in-progress\n  - Priority: medium";
        let tasks = parse(text);
        assert_eq!(tasks[0].created.as_deref(), Some("2026-03-01"));
        assert_eq!(tasks[0].status, Status::InProgress);
        assert_eq!(tasks[0].priority, Some(Priority::Medium));
    }

    #[test]
    fn test_bare_indented_lines_join_description() {
        let text = "- [ ] Research\n  read the upstream changelog\n  compare the two approaches";
        let tasks = parse(text);
        assert_eq!(
            tasks[0].description.as_deref(),
            Some("read the upstream changelog\ncompare the two approaches")
        );
    }

    #[test]
    fn test_description_key_lines_join_in_order() {
        let text = "- [ ] Research\n  description:: first line\n  description:: second line";
        let tasks = parse(text);
        assert_eq!(tasks[0].description.as_deref(), Some("first line\nsecond line"));
    }

    #[test]
    fn test_unrecognised_keys_are_dropped_but_extend_the_block() {
        let text = "- [ ] A\n  recurrence:: weekly\n  due:: 2026-05-01";
        let tasks = parse(text);
        assert_eq!(tasks[0].end_line, 2);
        assert_eq!(tasks[0].due.as_deref(), Some("2026-05-01"));
        assert_eq!(tasks[0].description, None);
    }

    #[test]
    fn test_invalid_priority_value_keeps_line_derived_priority() {
        let text = "- [ ] A ⏫\n  priority:: sometime";
        let tasks = parse(text);
        assert_eq!(tasks[0].priority, Some(Priority::High));
    }

    #[test]
    fn test_metadata_priority_overrides_line_priority() {
        let text = "- [ ] A ⏫\n  priority:: low";
        let tasks = parse(text);
        assert_eq!(tasks[0].priority, Some(Priority::Low));
    }

    #[test]
    fn test_metadata_status_overrides_keyword_status() {
        let text = "- [x] A\n  status:: cancelled";
        let tasks = parse(text);
        assert_eq!(tasks[0].status, Status::Cancelled);
    }

    #[test]
    fn test_indented_checklist_line_starts_a_new_task() {
        let text = "- [ ] Parent-ish\n  - [ ] Sibling really";
        let tasks = parse(text);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].end_line, 0);
        assert_eq!(tasks[1].start_line, 1);
    }

    #[test]
    fn test_line_ranges_are_disjoint_and_increasing() {
        let text = "\
# Week plan
- [ ] One
  due:: 2026-01-01
prose in between
- [x] Two
- [ ] Three
  status:: in-progress
  more detail here
";
        let tasks = parse(text);
        assert_eq!(tasks.len(), 3);
        for pair in tasks.windows(2) {
            assert!(pair[0].end_line < pair[1].start_line);
        }
        for t in &tasks {
            assert!(t.start_line <= t.end_line);
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "- [ ] A #x\n  due:: 2026-01-01\n- [x] B";
        let first = parse(text);
        let second = parse(text);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.start_line, b.start_line);
            assert_eq!(a.end_line, b.end_line);
        }
    }

    #[test]
    fn test_empty_document_parses_to_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("just prose\n\nmore prose").is_empty());
    }
}
