use crossterm::event::{KeyCode, KeyModifiers};

/// Single-line editable text buffer with a byte-offset cursor.
///
/// The cursor always sits on a character boundary; movement and deletion
/// step over whole characters, so multi-byte input is safe.
#[derive(Debug, Default)]
pub struct InputField {
    buffer: String,
    cursor: usize,
}

impl InputField {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Apply an editing key to the buffer. Returns `true` if the key was
    /// consumed (so callers can fall through for keys this field ignores).
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.cursor = self.cursor.min(self.buffer.len());

        match code {
            KeyCode::Left => {
                if let Some(ch) = self.buffer[..self.cursor].chars().next_back() {
                    self.cursor -= ch.len_utf8();
                }
                true
            }
            KeyCode::Right => {
                if let Some(ch) = self.buffer[self.cursor..].chars().next() {
                    self.cursor += ch.len_utf8();
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.buffer.len();
                true
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Backspace => {
                if let Some(ch) = self.buffer[..self.cursor].chars().next_back() {
                    let start = self.cursor - ch.len_utf8();
                    self.buffer.drain(start..self.cursor);
                    self.cursor = start;
                }
                true
            }
            KeyCode::Delete => {
                if let Some(ch) = self.buffer[self.cursor..].chars().next() {
                    self.buffer.drain(self.cursor..self.cursor + ch.len_utf8());
                }
                true
            }
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// The buffer with a visible block cursor at the cursor position.
    pub fn display_with_cursor(&self) -> String {
        let pos = self.cursor.min(self.buffer.len());
        let (before, after) = self.buffer.split_at(pos);
        format!("{before}\u{2588}{after}")
    }
}
