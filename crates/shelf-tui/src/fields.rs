//! Single-line text field editing.
//!
//! A small cursor-aware buffer for the login and item forms. Cursor
//! positions are in char units; conversion to byte offsets happens at the
//! edit site.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Mask character for password display.
const MASK: char = '\u{2022}';

/// A single-line editable text field.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    cursor: usize,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field whose display is masked (passwords).
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    /// A field prefilled with `value`, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            masked: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in char units.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The string to render: the raw value, or one mask char per char.
    pub fn display(&self) -> String {
        if self.masked {
            std::iter::repeat_n(MASK, self.value.chars().count()).collect()
        } else {
            self.value.clone()
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Applies a key event to the field. Returns true if the event was
    /// consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(ch) if !ctrl => {
                self.insert_char(ch);
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let idx = char_to_byte_index(&self.value, self.cursor);
                    self.value.remove(idx);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let idx = char_to_byte_index(&self.value, self.cursor);
                    self.value.remove(idx);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, ch: char) {
        let idx = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }
}

/// Converts a char index to a byte index, clamping to the end.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut field = TextField::new();
        for ch in "wigt".chars() {
            field.handle_key(press(KeyCode::Char(ch)));
        }
        field.handle_key(press(KeyCode::Left));
        field.handle_key(press(KeyCode::Char('e')));
        assert_eq!(field.value(), "wiget");
        field.handle_key(press(KeyCode::Left));
        field.handle_key(press(KeyCode::Left));
        field.handle_key(press(KeyCode::Char('d')));
        assert_eq!(field.value(), "widget");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut field = TextField::with_value("abc");
        field.handle_key(press(KeyCode::Backspace));
        assert_eq!(field.value(), "ab");
        field.handle_key(press(KeyCode::Home));
        field.handle_key(press(KeyCode::Delete));
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn test_masked_display_hides_value() {
        let mut field = TextField::masked();
        for ch in "secret".chars() {
            field.handle_key(press(KeyCode::Char(ch)));
        }
        assert_eq!(field.value(), "secret");
        assert_eq!(field.display(), "\u{2022}".repeat(6));
    }

    #[test]
    fn test_multibyte_chars_edit_cleanly() {
        let mut field = TextField::with_value("héllo");
        field.handle_key(press(KeyCode::Home));
        field.handle_key(press(KeyCode::Right));
        field.handle_key(press(KeyCode::Delete));
        assert_eq!(field.value(), "hllo");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut field = TextField::with_value("abc");
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        field.handle_key(key);
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
    }
}
