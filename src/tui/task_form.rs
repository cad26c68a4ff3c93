//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used by the add and edit
//! screens: text fields for the free-form values, cycling selectors for
//! priority and status, and conversion into a serializer payload.

use crate::{
    cmd::{parse_due_input, split_and_normalise_tags},
    config::Config,
    fields::{Priority, Status},
    task::{TaskFields, TaskRecord},
    tui::input::InputField,
};

/// Field order constants for form navigation.
pub const TITLE_ORDER: usize = 0;
pub const TAGS_ORDER: usize = 1;
pub const DUE_ORDER: usize = 2;
pub const CREATED_ORDER: usize = 3;
pub const DESCRIPTION_ORDER: usize = 4;
pub const PRIORITY_ORDER: usize = 5;
pub const STATUS_ORDER: usize = 6;

const FIELD_COUNT: usize = 7;

/// Task form for editing fields
pub struct TaskForm {
    pub title: InputField,
    pub tags: InputField,
    pub due: InputField,
    pub created: InputField,
    pub description: InputField,
    pub priority: usize,
    pub status: usize,
    pub current_field: usize,
    pub priorities: Vec<Option<Priority>>,
    pub statuses: Vec<Status>,
}

impl TaskForm {
    /// Create an empty form seeded with the configured default tags.
    pub fn new(config: &Config) -> Self {
        let mut form = Self {
            title: InputField::new(),
            tags: InputField::with_value(&config.default_tags.join(", ")),
            due: InputField::new(),
            created: InputField::new(),
            description: InputField::new(),
            priority: 0,
            status: 0,
            current_field: 0,
            priorities: vec![
                None,
                Some(Priority::Low),
                Some(Priority::Medium),
                Some(Priority::High),
            ],
            statuses: vec![
                Status::Todo,
                Status::InProgress,
                Status::Done,
                Status::Cancelled,
            ],
        };
        form.update_active_field();
        form
    }

    /// Create a form populated from an existing record.
    pub fn from_record(record: &TaskRecord, config: &Config) -> Self {
        let mut form = Self::new(config);
        form.title = InputField::with_value(&record.title);
        form.tags = InputField::with_value(&record.tags.join(", "));
        form.due = InputField::with_value(record.due.as_deref().unwrap_or(""));
        form.created = InputField::with_value(record.created.as_deref().unwrap_or(""));
        form.description = InputField::with_value(record.description.as_deref().unwrap_or(""));
        form.priority = form
            .priorities
            .iter()
            .position(|&p| p == record.priority)
            .unwrap_or(0);
        form.status = form
            .statuses
            .iter()
            .position(|&s| s == record.status)
            .unwrap_or(0);
        form.update_active_field();
        form
    }

    /// Mutable references to the text fields in visual order. Selectors are
    /// handled separately.
    fn fields_mut(&mut self) -> [&mut InputField; 5] {
        [
            &mut self.title,
            &mut self.tags,
            &mut self.due,
            &mut self.created,
            &mut self.description,
        ]
    }

    fn active_field_mut(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            TAGS_ORDER => Some(&mut self.tags),
            DUE_ORDER => Some(&mut self.due),
            CREATED_ORDER => Some(&mut self.created),
            DESCRIPTION_ORDER => Some(&mut self.description),
            _ => None,
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        for field in self.fields_mut() {
            field.active = false;
        }
        if let Some(field) = self.active_field_mut() {
            field.active = true;
        }
    }

    /// Type a character into the active text field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_field_mut() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_field_mut() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_field_mut() {
            field.handle_delete();
        }
    }

    pub fn handle_home(&mut self) {
        if let Some(field) = self.active_field_mut() {
            field.move_cursor_home();
        }
    }

    pub fn handle_end(&mut self) {
        if let Some(field) = self.active_field_mut() {
            field.move_cursor_end();
        }
    }

    /// Left/right arrows: move the text cursor, or cycle the selector under
    /// the cursor.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            PRIORITY_ORDER => {
                self.priority = cycle(self.priority, self.priorities.len(), right);
            }
            STATUS_ORDER => {
                self.status = cycle(self.status, self.statuses.len(), right);
            }
            _ => {
                if let Some(field) = self.active_field_mut() {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }

    /// Validate the form and build a serializer payload.
    pub fn to_payload(&self) -> Result<TaskFields, String> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }

        let due = match self.due.value.trim() {
            "" => None,
            raw => Some(
                parse_due_input(raw)
                    .ok_or_else(|| format!("Invalid due date: '{raw}'"))?
                    .format("%Y-%m-%d")
                    .to_string(),
            ),
        };

        let optional = |field: &InputField| {
            let v = field.value.trim();
            (!v.is_empty()).then(|| v.to_string())
        };

        Ok(TaskFields {
            title: title.to_string(),
            tags: split_and_normalise_tags(&[self.tags.value.clone()]),
            priority: self.priorities[self.priority],
            status: self.statuses[self.status],
            description: optional(&self.description),
            created: optional(&self.created),
            due,
        })
    }
}

fn cycle(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requires_title() {
        let form = TaskForm::new(&Config::default());
        assert!(form.to_payload().is_err());
    }

    #[test]
    fn test_payload_normalises_tags_and_due() {
        let mut form = TaskForm::new(&Config::default());
        form.title = InputField::with_value("Plan trip");
        form.tags = InputField::with_value("Travel, travel, fun");
        form.due = InputField::with_value("2026-07-01");
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.tags, vec!["#travel", "#fun"]);
        assert_eq!(payload.due.as_deref(), Some("2026-07-01"));
    }

    #[test]
    fn test_payload_rejects_bad_due_input() {
        let mut form = TaskForm::new(&Config::default());
        form.title = InputField::with_value("Plan trip");
        form.due = InputField::with_value("eventually");
        assert!(form.to_payload().is_err());
    }

    #[test]
    fn test_default_tags_seed_the_form() {
        let config = Config {
            default_tags: vec!["#inbox".to_string()],
            ..Config::default()
        };
        let form = TaskForm::new(&config);
        assert_eq!(form.tags.value, "#inbox");
    }

    #[test]
    fn test_selector_cycling_wraps() {
        let mut form = TaskForm::new(&Config::default());
        form.current_field = STATUS_ORDER;
        form.handle_left_right(false);
        assert_eq!(form.statuses[form.status], Status::Cancelled);
        form.handle_left_right(true);
        assert_eq!(form.statuses[form.status], Status::Todo);
    }
}
