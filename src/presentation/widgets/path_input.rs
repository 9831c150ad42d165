//! Single-line input for typing or pasting a file path.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::presentation::theme::Theme;

/// Outcome of a key press in the path input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInputAction {
    /// Enter was pressed.
    Submit(String),
    /// Esc was pressed.
    Cancel,
    /// Keep editing.
    None,
}

/// Path entry field. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct PathInput {
    value: String,
    cursor: usize,
}

impl PathInput {
    /// Empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the text and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Empties the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn len_chars(&self) -> usize {
        self.value.chars().count()
    }

    /// Inserts pasted text, dropping line breaks.
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.value.insert_str(at, &text);
        self.cursor += text.chars().count();
    }

    /// Inserts one character.
    pub fn input_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Deletes under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len_chars() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Handles editing keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> PathInputAction {
        match key.code {
            KeyCode::Esc => return PathInputAction::Cancel,
            KeyCode::Enter => {
                let value = self.value.trim().to_string();
                return if value.is_empty() {
                    PathInputAction::None
                } else {
                    PathInputAction::Submit(value)
                };
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.clear(),
            KeyCode::Char(c) => self.input_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len_chars()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len_chars(),
            _ => {}
        }
        PathInputAction::None
    }
}

/// Borrowed view used for drawing.
pub struct PathInputView<'a> {
    input: &'a PathInput,
    theme: &'a Theme,
}

impl<'a> PathInputView<'a> {
    /// View of `input`.
    #[must_use]
    pub const fn new(input: &'a PathInput, theme: &'a Theme) -> Self {
        Self { input, theme }
    }
}

impl Widget for PathInputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(" Image path (Enter to stage, Esc to cancel) ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 {
            return;
        }

        // Keep the cursor on screen for long paths.
        let width = usize::from(inner.width);
        let skip = (self.input.cursor + 1).saturating_sub(width);
        let visible: String = self.input.value.chars().skip(skip).take(width).collect();

        let paragraph = if self.input.value.is_empty() {
            Paragraph::new("~/Pictures/photo.png").style(self.theme.dimmed_style)
        } else {
            Paragraph::new(visible).style(self.theme.base_style)
        };
        paragraph.render(inner, buf);

        #[allow(clippy::cast_possible_truncation)]
        let cursor_x = inner.x + (self.input.cursor - skip) as u16;
        if cursor_x < inner.x + inner.width {
            buf[(cursor_x, inner.y)].set_style(self.theme.selection_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_edit_multibyte_path() {
        let mut input = PathInput::new();
        input.set_value("/tmp/café.png");

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));

        assert_eq!(input.value(), "/tmp/caf.png");
        assert_eq!(input.cursor(), 8);
    }

    #[test]
    fn test_insert_str_drops_newlines() {
        let mut input = PathInput::new();
        input.insert_str("/tmp/a.png\n");

        assert_eq!(input.value(), "/tmp/a.png");
        assert_eq!(input.cursor(), 10);
    }

    #[test]
    fn test_submit_trims_and_ignores_blank() {
        let mut input = PathInput::new();
        assert_eq!(input.handle_key(key(KeyCode::Enter)), PathInputAction::None);

        input.set_value("  /tmp/a.png ");
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            PathInputAction::Submit("/tmp/a.png".to_string())
        );
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = PathInput::new();
        input.set_value("abc");

        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));

        assert!(input.value().is_empty());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), PathInputAction::Cancel);
    }

    #[test]
    fn test_render_scrolls_to_cursor() {
        let theme = Theme::default();
        let mut input = PathInput::new();
        input.set_value("/a/very/long/path/to/image.png");
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);

        PathInputView::new(&input, &theme).render(area, &mut buf);

        let row: String = (1..11).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "image.png ");
    }
}
