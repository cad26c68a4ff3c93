//! Input field handling for the terminal user interface.

/// A single-line text input with a character-indexed cursor.
///
/// The cursor counts characters, not bytes, so multibyte input (tags with
/// accents, emoji in titles) never splits a code point.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the cursor.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = InputField::new();
        for c in "abc".chars() {
            field.handle_char(c);
        }
        assert_eq!(field.value, "abc");
        field.handle_backspace();
        assert_eq!(field.value, "ab");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_multibyte_insert_mid_string() {
        let mut field = InputField::with_value("résumé");
        field.move_cursor_left();
        field.handle_char('x');
        assert_eq!(field.value, "résumxé");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut field = InputField::with_value("abc");
        field.move_cursor_home();
        field.handle_delete();
        assert_eq!(field.value, "bc");
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut field = InputField::with_value("ab");
        field.move_cursor_right();
        assert_eq!(field.cursor, 2);
        field.move_cursor_home();
        field.move_cursor_left();
        assert_eq!(field.cursor, 0);
    }
}
