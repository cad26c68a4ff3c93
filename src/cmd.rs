//! Command implementations for the CLI interface.
//!
//! This module contains the subcommand definitions and their handlers, from
//! task CRUD against a note file to the TUI and the document picker menu.
//! Handlers follow a strict read-modify-write discipline: load the file,
//! parse it, apply at most one structural change, serialize, splice, save —
//! and never reuse line ranges across an edit.

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::cli::Cli;
use crate::config::Config;
use crate::doc::Document;
use crate::fields::{DueFilter, Priority, SortKey, Status};
use crate::parser::parse;
use crate::serializer::serialize;
use crate::task::{TaskFields, TaskRecord};
use crate::tui::menu::MenuApp;
use crate::tui::run::{run_menu, run_tui};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI on the most recent note.
    Ui,

    /// Open the note picker menu.
    Menu,

    /// Add a new task to the note.
    Add {
        /// Short title for the task.
        title: String,
        /// Tags. May be repeated and comma-separated.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or a weekday.
        #[arg(long)]
        due: Option<String>,
        /// Creation date override (YYYY-MM-DD).
        #[arg(long)]
        created: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Status: todo | in-progress | done | cancelled.
        #[arg(long, value_enum, default_value_t = Status::Todo)]
        status: Status,
        /// Longer free-form description.
        #[arg(long)]
        desc: Option<String>,
    },

    /// List tasks with optional filters.
    List {
        /// Include done and cancelled tasks.
        #[arg(long)]
        all: bool,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Filter by tag. May be repeated. Accepts comma-separated.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Due filter: today | this-week | overdue | none.
        #[arg(long, value_enum)]
        due: Option<DueFilter>,
        /// Sort key.
        #[arg(long, value_enum, default_value_t = SortKey::Line)]
        sort: SortKey,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
        /// Print records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// View a single task by number or title.
    View {
        /// Task number (from `list`) or title.
        id: String,
    },

    /// Update fields on a task.
    Update {
        /// Task number or title to update.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        created: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Add tags. May be repeated and comma-separated.
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,
        /// Remove tags. May be repeated and comma-separated.
        #[arg(long = "rm-tag")]
        rm_tags: Vec<String>,
        /// Clear due date.
        #[arg(long)]
        clear_due: bool,
        /// Clear description.
        #[arg(long)]
        clear_desc: bool,
        /// Clear priority.
        #[arg(long)]
        clear_priority: bool,
    },

    /// Mark a task done.
    Complete {
        /// Task number or title.
        id: String,
    },

    /// Reopen a task (status todo).
    Reopen {
        /// Task number or title.
        id: String,
    },

    /// Toggle a task's checkbox (done <-> todo).
    Toggle {
        /// Task number or title.
        id: String,
    },

    /// Delete a task block from the note.
    Delete {
        /// Task number or title.
        id: String,
    },

    /// List distinct tags and counts.
    Tags,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface on a note file.
pub fn cmd_ui(path: &Path, config: &Config) {
    if let Err(e) = run_tui(path, config) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Open the note picker menu, then the TUI on the chosen note.
pub fn cmd_menu(notes_dir: &Path, config: &Config) {
    let mut app = match MenuApp::new(notes_dir.to_path_buf()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Menu error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_menu(&mut app) {
        eprintln!("Menu error: {e}");
        std::process::exit(1);
    }
    if let Some(note) = app.get_selected_note() {
        println!("Opening note: {}", note.display_name);
        let path = note.file_path.clone();
        cmd_ui(&path, config);
    }
}

/// Add a new task block at the end of the note.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    path: &Path,
    config: &Config,
    title: String,
    tags: Vec<String>,
    due: Option<String>,
    created: Option<String>,
    priority: Option<Priority>,
    status: Status,
    desc: Option<String>,
) {
    let mut all_tags = split_and_normalise_tags(&config.default_tags);
    for tag in split_and_normalise_tags(&tags) {
        if !all_tags.contains(&tag) {
            all_tags.push(tag);
        }
    }

    let created = created.or_else(|| {
        config
            .stamp_created
            .then(|| Local::now().date_naive().format("%Y-%m-%d").to_string())
    });

    let fields = TaskFields {
        title,
        tags: all_tags,
        priority,
        status,
        description: desc,
        created,
        due: due.as_deref().map(normalise_due_input),
    };

    let block = match serialize(&fields, config.dialect) {
        Ok(block) => block,
        Err(e) => {
            eprintln!("Cannot add task: {e}");
            std::process::exit(1);
        }
    };

    let mut doc = load_document(path);
    doc.append_block(&block);
    save_document(&doc);

    let count = parse(&doc.text()).len();
    println!("Added task {count} to {}", path.display());
}

/// List tasks with optional filtering and sorting.
#[allow(clippy::too_many_arguments)]
pub fn cmd_list(
    path: &Path,
    all: bool,
    status: Option<Status>,
    tags: Vec<String>,
    due: Option<DueFilter>,
    sort: SortKey,
    limit: Option<usize>,
    json: bool,
) {
    let doc = load_document(path);
    let records = parse(&doc.text());
    let tags = split_and_normalise_tags(&tags);
    let today = Local::now().date_naive();
    let (week_start, week_end) = start_end_of_this_week(today);

    let mut filtered: Vec<(usize, &TaskRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            if !all && matches!(t.status, Status::Done | Status::Cancelled) && status.is_none() {
                return false;
            }
            if let Some(s) = status {
                if t.status != s {
                    return false;
                }
            }
            if !tags.is_empty() && !tags.iter().all(|tag| t.tags.contains(tag)) {
                return false;
            }
            if let Some(df) = due {
                let date = t.due.as_deref().and_then(parse_date);
                match df {
                    DueFilter::Today => {
                        if date != Some(today) {
                            return false;
                        }
                    }
                    DueFilter::ThisWeek => match date {
                        Some(d) if d >= week_start && d <= week_end => {}
                        _ => return false,
                    },
                    DueFilter::Overdue => match date {
                        Some(d) if d < today => {}
                        _ => return false,
                    },
                    DueFilter::None => {
                        if t.due.is_some() {
                            return false;
                        }
                    }
                }
            }
            true
        })
        .collect();

    match sort {
        SortKey::Line => {}
        SortKey::Due => filtered.sort_by_key(|(_, t)| {
            t.due
                .as_deref()
                .and_then(parse_date)
                .unwrap_or(NaiveDate::MAX)
        }),
        SortKey::Priority => {
            filtered.sort_by(|(_, a), (_, b)| b.priority.cmp(&a.priority));
        }
    }

    if let Some(n) = limit {
        filtered.truncate(n);
    }

    if json {
        let rows: Vec<&TaskRecord> = filtered.iter().map(|(_, t)| *t).collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Failed to render JSON: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_table(&filtered, today);
    }
}

/// View a single task's full details.
pub fn cmd_view(path: &Path, id: String) {
    let doc = load_document(path);
    let records = parse(&doc.text());
    let index = resolve_or_exit(&id, &records);
    let task = &records[index];
    let today = Local::now().date_naive();

    println!("Task:         {}", index + 1);
    println!("Title:        {}", task.title);
    println!("Status:       {}", task.status.as_keyword());
    println!("Priority:     {}", task.priority.map_or("-", |p| p.as_keyword()));
    println!(
        "Due:          {}",
        match task.due.as_deref() {
            Some(d) => format!("{d} ({})", format_due_relative(Some(d), today)),
            None => "-".into(),
        }
    );
    println!("Created:      {}", task.created.as_deref().unwrap_or("-"));
    println!(
        "Tags:         {}",
        if task.tags.is_empty() { "-".into() } else { task.tags.join(" ") }
    );
    println!(
        "Lines:        {}-{} ({} line block)",
        task.start_line + 1,
        task.end_line + 1,
        task.line_count()
    );
    println!(
        "Description:\n{}\n",
        task.description.as_deref().unwrap_or("-")
    );
}

/// Update fields on a task and rewrite its block in place.
#[allow(clippy::too_many_arguments)]
pub fn cmd_update(
    path: &Path,
    config: &Config,
    id: String,
    title: Option<String>,
    desc: Option<String>,
    due: Option<String>,
    created: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    add_tags: Vec<String>,
    rm_tags: Vec<String>,
    clear_due: bool,
    clear_desc: bool,
    clear_priority: bool,
) {
    let mut doc = load_document(path);
    let records = parse(&doc.text());
    let index = resolve_or_exit(&id, &records);
    let record = &records[index];

    let mut fields = TaskFields::from(record);
    if let Some(t) = title {
        fields.title = t;
    }
    if let Some(d) = desc {
        fields.description = Some(d);
    }
    if let Some(d) = due {
        fields.due = Some(normalise_due_input(&d));
    }
    if let Some(c) = created {
        fields.created = Some(c);
    }
    if let Some(p) = priority {
        fields.priority = Some(p);
    }
    if let Some(s) = status {
        fields.status = s;
    }
    for tag in split_and_normalise_tags(&add_tags) {
        if !fields.tags.contains(&tag) {
            fields.tags.push(tag);
        }
    }
    let rm = split_and_normalise_tags(&rm_tags);
    fields.tags.retain(|t| !rm.contains(t));
    if clear_due {
        fields.due = None;
    }
    if clear_desc {
        fields.description = None;
    }
    if clear_priority {
        fields.priority = None;
    }

    replace_record(&mut doc, record, &fields, config);
    println!("Updated task {}", index + 1);
}

/// Mark a task done.
pub fn cmd_complete(path: &Path, config: &Config, id: String) {
    set_status(path, config, &id, Status::Done, "Completed");
}

/// Reopen a task.
pub fn cmd_reopen(path: &Path, config: &Config, id: String) {
    set_status(path, config, &id, Status::Todo, "Reopened");
}

/// Toggle a task's checkbox between done and todo.
pub fn cmd_toggle(path: &Path, config: &Config, id: String) {
    let mut doc = load_document(path);
    let records = parse(&doc.text());
    let index = resolve_or_exit(&id, &records);
    let record = &records[index];

    let mut fields = TaskFields::from(record);
    fields.status = if record.status == Status::Done {
        Status::Todo
    } else {
        Status::Done
    };

    let verb = if fields.status == Status::Done { "Checked" } else { "Unchecked" };
    replace_record(&mut doc, record, &fields, config);
    println!("{verb} task {}", index + 1);
}

fn set_status(path: &Path, config: &Config, id: &str, status: Status, verb: &str) {
    let mut doc = load_document(path);
    let records = parse(&doc.text());
    let index = resolve_or_exit(id, &records);
    let record = &records[index];

    let mut fields = TaskFields::from(record);
    fields.status = status;

    replace_record(&mut doc, record, &fields, config);
    println!("{verb} task {}", index + 1);
}

/// Delete a task block from the note.
pub fn cmd_delete(path: &Path, id: String) {
    let mut doc = load_document(path);
    let records = parse(&doc.text());
    let index = resolve_or_exit(&id, &records);
    let record = &records[index];

    doc.delete_block(record.start_line, record.end_line);
    save_document(&doc);
    println!("Deleted task {} ({})", index + 1, record.title);
}

/// List distinct tags and how many tasks carry each.
pub fn cmd_tags(path: &Path) {
    let doc = load_document(path);
    let records = parse(&doc.text());

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for t in &records {
        for tag in &t.tags {
            *counts.entry(tag.clone()).or_default() += 1;
        }
    }
    println!("{:<20} {}", "Tag", "Count");
    for (tag, c) in counts {
        println!("{:<20} {}", truncate(&tag, 20), c);
    }
}

/// Generate shell completion scripts on stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "td", &mut std::io::stdout());
}

// ---- shared helpers ----

fn load_document(path: &Path) -> Document {
    match Document::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error reading note: {e}");
            std::process::exit(1);
        }
    }
}

fn save_document(doc: &Document) {
    if let Err(e) = doc.save() {
        eprintln!("Failed to save note: {e}");
        std::process::exit(1);
    }
}

/// Serialize the payload and splice it over the record's line span.
fn replace_record(doc: &mut Document, record: &TaskRecord, fields: &TaskFields, config: &Config) {
    let block = match serialize(fields, config.dialect) {
        Ok(block) => block,
        Err(e) => {
            eprintln!("Cannot rewrite task: {e}");
            std::process::exit(1);
        }
    };
    doc.replace_block(record.start_line, record.end_line, &block);
    save_document(doc);
}

fn resolve_or_exit(identifier: &str, records: &[TaskRecord]) -> usize {
    match resolve_task_identifier(identifier, records) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error resolving task: {e}");
            std::process::exit(1);
        }
    }
}

/// Resolve a task identifier (1-based list number or title) to an index into
/// the parsed records. Ambiguous titles are an error listing candidates.
pub fn resolve_task_identifier(identifier: &str, records: &[TaskRecord]) -> Result<usize, String> {
    if let Ok(n) = identifier.parse::<usize>() {
        if n >= 1 && n <= records.len() {
            return Ok(n - 1);
        }
        return Err(format!(
            "Task number {} out of range (note has {} tasks)",
            n,
            records.len()
        ));
    }

    let matches: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, t)| t.title.eq_ignore_ascii_case(identifier))
        .map(|(i, _)| i)
        .collect();

    match matches.len() {
        0 => Err(format!("No task found with title '{identifier}'")),
        1 => Ok(matches[0]),
        _ => {
            let mut msg = format!("Multiple tasks found with title '{identifier}':\n");
            for i in &matches {
                msg.push_str(&format!("  {}: line {}\n", i + 1, records[*i].start_line + 1));
            }
            msg.push_str("Please use the task number instead.");
            Err(msg)
        }
    }
}

/// Normalise a tag: trimmed, lowercased, spaces to hyphens, `#`-prefixed.
pub fn normalise_tag(s: &str) -> String {
    let tag = s.trim().trim_start_matches('#').to_lowercase().replace(' ', "-");
    format!("#{tag}")
}

/// Split comma-separated tag inputs and normalise each, deduplicating while
/// preserving first-seen order.
pub fn split_and_normalise_tags(inputs: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in inputs {
        for part in raw.split(',') {
            if part.trim().is_empty() {
                continue;
            }
            let tag = normalise_tag(part);
            if tag != "#" && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

/// Parse human-readable due input and normalise to a `YYYY-MM-DD` string.
/// Unrecognised input is an error: the stored form must stay machine-sortable.
pub fn normalise_due_input(s: &str) -> String {
    match parse_due_input(s) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => {
            eprintln!("Invalid due date: '{s}' (try YYYY-MM-DD, today, tomorrow, in 3d, friday)");
            std::process::exit(1);
        }
    }
}

/// Parse human-readable due date input with natural language support.
///
/// Supports "today", "tomorrow", "in 3d" / "in 2w", bare and "next" weekday
/// names, and the `YYYY-MM-DD` form.
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(n) = rest.strip_suffix('d').and_then(|v| v.trim().parse::<i64>().ok()) {
            return Some(today + Duration::days(n));
        }
        if let Some(n) = rest.strip_suffix('w').and_then(|v| v.trim().parse::<i64>().ok()) {
            return Some(today + Duration::weeks(n));
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    for (day_name, target_day) in weekdays {
        let current = today.weekday().num_days_from_monday() as i32;
        if s == day_name {
            let ahead = (target_day + 7 - current) % 7;
            return Some(today + Duration::days(ahead as i64));
        }
        if s == format!("next {day_name}") {
            let ahead = (target_day + 7 - current) % 7;
            let ahead = if ahead == 0 { 7 } else { ahead + 7 };
            return Some(today + Duration::days(ahead as i64));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Parse a stored `YYYY-MM-DD` value, returning `None` for anything else.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Start and end dates of the current ISO week (Monday to Sunday).
pub fn start_end_of_this_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    let end = start + Duration::days(6);
    (start, end)
}

/// Format a stored due date relative to today ("today", "in 3d", "2d late").
/// Values that don't parse as dates are echoed verbatim.
pub fn format_due_relative(due: Option<&str>, today: NaiveDate) -> String {
    let Some(raw) = due else {
        return "-".into();
    };
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };
    let days = (date - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

/// Checkbox-style state glyph for table rows.
pub fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::Todo => "[ ]",
        Status::InProgress => "[~]",
        Status::Done => "[x]",
        Status::Cancelled => "[/]",
    }
}

/// Print tasks in a formatted table.
fn print_table(rows: &[(usize, &TaskRecord)], today: NaiveDate) {
    println!(
        "{:<4} {:<4} {:<12} {:<6} {:<10} {}",
        "#", "St", "Status", "Pri", "Due", "Title [tags]"
    );
    for (index, t) in rows {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", t.tags.join(" "))
        };
        println!(
            "{:<4} {:<4} {:<12} {:<6} {:<10} {}{}",
            index + 1,
            status_glyph(t.status),
            t.status.as_keyword(),
            t.priority.map_or("-", |p| p.as_keyword()),
            format_due_relative(t.due.as_deref(), today),
            truncate(&t.title, 48),
            tags
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::CheckboxState;

    fn record(title: &str, line: usize) -> TaskRecord {
        TaskRecord {
            start_line: line,
            end_line: line,
            checkbox: CheckboxState::Open,
            title: title.to_string(),
            tags: Vec::new(),
            priority: None,
            status: Status::Todo,
            description: None,
            created: None,
            due: None,
            raw_line: format!("- [ ] {title}"),
        }
    }

    #[test]
    fn test_split_and_normalise_tags_preserves_order() {
        let tags = split_and_normalise_tags(&["Home, errand".to_string(), "#home".to_string()]);
        assert_eq!(tags, vec!["#home", "#errand"]);
    }

    #[test]
    fn test_normalise_tag_adds_hash_and_hyphenates() {
        assert_eq!(normalise_tag("Deep Work"), "#deep-work");
        assert_eq!(normalise_tag("#Errand"), "#errand");
    }

    #[test]
    fn test_resolve_by_number() {
        let records = vec![record("One", 0), record("Two", 2)];
        assert_eq!(resolve_task_identifier("2", &records), Ok(1));
        assert!(resolve_task_identifier("3", &records).is_err());
        assert!(resolve_task_identifier("0", &records).is_err());
    }

    #[test]
    fn test_resolve_by_title_case_insensitive() {
        let records = vec![record("Buy milk", 0), record("Call bank", 2)];
        assert_eq!(resolve_task_identifier("buy MILK", &records), Ok(0));
        assert!(resolve_task_identifier("unknown", &records).is_err());
    }

    #[test]
    fn test_resolve_ambiguous_title_errors() {
        let records = vec![record("Dup", 0), record("Dup", 2)];
        let err = resolve_task_identifier("dup", &records).unwrap_err();
        assert!(err.contains("Multiple tasks"));
    }

    #[test]
    fn test_parse_due_input_relative_forms() {
        let today = Local::now().date_naive();
        assert_eq!(parse_due_input("today"), Some(today));
        assert_eq!(parse_due_input("Tomorrow"), Some(today + Duration::days(1)));
        assert_eq!(parse_due_input("in 3d"), Some(today + Duration::days(3)));
        assert_eq!(parse_due_input("in 2w"), Some(today + Duration::weeks(2)));
        assert_eq!(
            parse_due_input("2026-02-14"),
            NaiveDate::from_ymd_opt(2026, 2, 14)
        );
        assert_eq!(parse_due_input("whenever"), None);
    }

    #[test]
    fn test_format_due_relative() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        assert_eq!(format_due_relative(Some("2026-01-10"), today), "today");
        assert_eq!(format_due_relative(Some("2026-01-11"), today), "tomorrow");
        assert_eq!(format_due_relative(Some("2026-01-13"), today), "in 3d");
        assert_eq!(format_due_relative(Some("2026-01-08"), today), "2d late");
        assert_eq!(format_due_relative(Some("not-a-date"), today), "not-a-date");
        assert_eq!(format_due_relative(None, today), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("much too long for this", 10), "much too …");
    }
}
