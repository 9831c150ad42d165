//! Key bindings of the upload view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::borrow::Cow;

/// What a key press asks the upload view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Dismiss the visible toast.
    Dismiss,

    // Staging
    /// Pick a file from the explorer.
    OpenFileExplorer,
    /// Type a path.
    EnterPath,
    /// Stage the clipboard image.
    PasteClipboard,
    /// Drop the staged file.
    ClearCandidate,

    // Result
    /// Send the staged file for background removal.
    Process,
    /// Download the current result.
    Download,
    /// Copy the current result url.
    CopyResultUrl,

    // History
    /// Toggle focus between upload and history.
    FocusHistory,
    /// Select the previous entry.
    NavigateUp,
    /// Select the next entry.
    NavigateDown,
    /// Download the selected entry.
    DownloadEntry,
    /// Remove the selected entry.
    RemoveEntry,
    /// Remove every entry.
    ClearHistory,
}

/// A key bound to an action, with its footer label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    /// Triggering key.
    pub key: KeyEvent,
    /// Bound action.
    pub action: Action,
    /// Footer label.
    pub label: Cow<'static, str>,
    /// Whether the footer lists it.
    pub visible_in_bar: bool,
}

impl Keybind {
    /// Creates a binding shown in the footer.
    pub fn new(key: KeyEvent, action: Action, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key,
            action,
            label: label.into(),
            visible_in_bar: true,
        }
    }

    /// Keeps the binding out of the footer.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible_in_bar = false;
        self
    }

    /// Whether `event` triggers this binding.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key.code == event.code && self.key.modifiers == event.modifiers
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Bindings active while the staging area has focus.
#[must_use]
pub fn upload_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(key(KeyCode::Char('o')), Action::OpenFileExplorer, "Open"),
        Keybind::new(key(KeyCode::Char('i')), Action::EnterPath, "Path"),
        Keybind::new(ctrl('v'), Action::PasteClipboard, "Paste"),
        Keybind::new(key(KeyCode::Enter), Action::Process, "Remove BG"),
        Keybind::new(key(KeyCode::Char('p')), Action::Process, "Remove BG").hidden(),
        Keybind::new(key(KeyCode::Char('d')), Action::Download, "Download"),
        Keybind::new(key(KeyCode::Char('y')), Action::CopyResultUrl, "Copy URL"),
        Keybind::new(key(KeyCode::Char('x')), Action::ClearCandidate, "Clear"),
        Keybind::new(key(KeyCode::Tab), Action::FocusHistory, "History"),
        Keybind::new(key(KeyCode::Esc), Action::Dismiss, "Dismiss").hidden(),
        Keybind::new(key(KeyCode::Char('q')), Action::Quit, "Quit"),
    ]
}

/// Bindings active while the history list has focus.
#[must_use]
pub fn history_bindings() -> Vec<Keybind> {
    vec![
        Keybind::new(key(KeyCode::Up), Action::NavigateUp, "Up").hidden(),
        Keybind::new(key(KeyCode::Char('k')), Action::NavigateUp, "Up").hidden(),
        Keybind::new(key(KeyCode::Down), Action::NavigateDown, "Down").hidden(),
        Keybind::new(key(KeyCode::Char('j')), Action::NavigateDown, "Down").hidden(),
        Keybind::new(key(KeyCode::Enter), Action::DownloadEntry, "Download"),
        Keybind::new(key(KeyCode::Char('r')), Action::RemoveEntry, "Remove"),
        Keybind::new(key(KeyCode::Delete), Action::RemoveEntry, "Remove").hidden(),
        Keybind::new(
            KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT),
            Action::ClearHistory,
            "Clear all",
        ),
        Keybind::new(key(KeyCode::Char('C')), Action::ClearHistory, "Clear all").hidden(),
        Keybind::new(key(KeyCode::Tab), Action::FocusHistory, "Upload"),
        Keybind::new(key(KeyCode::Esc), Action::Dismiss, "Dismiss").hidden(),
        Keybind::new(key(KeyCode::Char('q')), Action::Quit, "Quit"),
    ]
}

/// Finds the action bound to `event`.
#[must_use]
pub fn resolve(bindings: &[Keybind], event: &KeyEvent) -> Option<Action> {
    bindings.iter().find(|b| b.matches(event)).map(|b| b.action)
}
