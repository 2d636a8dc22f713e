use crate::keymap::Action;
use crossterm::event::KeyCode;

/// Single-line editable buffer.
///
/// The cursor counts characters, not bytes. With a character limit set,
/// keystrokes past the limit are dropped.
///
/// # Example
/// ```
/// use secretly::utils::text_input::TextInput;
///
/// let mut input = TextInput::new().with_char_limit(3);
/// for c in "abcd".chars() {
///     input.insert_char(c);
/// }
/// assert_eq!(input.text(), "abc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
    char_limit: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    /// Limit the buffer to `limit` characters, truncating what is there.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        let text = std::mem::take(&mut self.text);
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character at `index`, or the end of the text.
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = match self.char_limit {
            Some(limit) => text.chars().take(limit).collect(),
            None => text,
        };
        self.cursor = self.len();
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() || self.char_limit.is_some_and(|limit| self.len() >= limit) {
            return;
        }
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let offset = self.byte_offset(self.cursor);
            self.text.remove(offset);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let offset = self.byte_offset(self.cursor);
            self.text.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// The slice of text visible in a field `width` columns wide.
    ///
    /// Returns the visible characters and the cursor column inside them. The
    /// window scrolls so the cursor always stays visible.
    pub fn visible_window(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        // Keep one column free for the cursor when it sits at the end
        let start = (self.cursor + 1).saturating_sub(width);
        let visible: String = self.text.chars().skip(start).take(width).collect();
        (visible, self.cursor - start)
    }

    /// Apply a raw key. Returns false for keys a text field ignores.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Apply a keymap action. Returns false for non-editing actions.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Home => self.move_home(),
            Action::End => self.move_end(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    /// Whether `action` may fire while a field has focus.
    ///
    /// Actions bound to printable keys (`q`, `d`, `n`, space) are refused so
    /// the character is typed instead.
    pub fn is_action_allowed_when_focused(action: &Action) -> bool {
        matches!(
            action,
            Action::Cancel
                | Action::Confirm
                | Action::NextField
                | Action::PrevField
                | Action::MoveLeft
                | Action::MoveRight
                | Action::Home
                | Action::End
                | Action::Backspace
                | Action::DeleteChar
        )
    }
}
