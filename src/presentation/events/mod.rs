//! Event handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal input the app reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press.
    Key(KeyEvent),
    /// Text delivered by bracketed paste, including dropped file paths.
    Paste(String),
    /// The terminal was resized.
    Resize,
    /// Anything else, including key releases.
    Ignored,
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::Key(key),
            Event::Paste(text) => Self::Paste(text),
            Event::Resize(..) => Self::Resize,
            _ => Self::Ignored,
        }
    }
}

/// Checks if key quits regardless of focus.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}
