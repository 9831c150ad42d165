//! The single screen of the terminal client.

use std::path::PathBuf;

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

use crate::application::dto::ProcessingJob;
use crate::application::services::UploadSession;
use crate::domain::NotificationLevel;
use crate::domain::errors::UploadError;
use crate::domain::keybinding::{self, Action, Keybind};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    FileExplorer, FileExplorerAction, FocusContext, FooterBar, FooterBarStyle, HistoryList,
    HistoryListState, PathInput, PathInputAction, PathInputView, PreviewPanel,
};
use crate::{NAME, VERSION};

const PREVIEW_WIDTH_PERCENT: u16 = 55;

/// Pane receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadFocus {
    /// The staged file and its result.
    #[default]
    Upload,
    /// The history list.
    History,
}

impl UploadFocus {
    const fn toggle(self) -> Self {
        match self {
            Self::Upload => Self::History,
            Self::History => Self::Upload,
        }
    }
}

enum Overlay {
    None,
    FileExplorer(FileExplorer),
    PathInput(PathInput),
}

/// What the app must do after a key press.
#[derive(Debug)]
pub enum UploadKeyResult {
    /// Handled, nothing else to do.
    Consumed,
    /// Not handled.
    Ignored,
    /// Leave the application.
    Quit,
    /// Dismiss the visible toast.
    Dismiss,
    /// Stage a file picked in the explorer.
    StagePath(PathBuf),
    /// Stage a typed or pasted path.
    StageTyped(String),
    /// Read an image from the clipboard.
    PasteClipboard,
    /// Send the job to the backend.
    Process(ProcessingJob),
    /// The request was refused before any work.
    Rejected(UploadError),
    /// Download a result.
    Download { url: String, name: String },
    /// Copy a result url.
    CopyText(String),
    /// Show a toast.
    Notice {
        level: NotificationLevel,
        title: &'static str,
        body: String,
    },
}

/// Display options taken from the configuration.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    /// Directory the explorer opens in.
    pub start_dir: PathBuf,
    /// Hide non-image files in the explorer.
    pub images_only: bool,
    /// chrono format for history timestamps.
    pub timestamp_format: String,
    /// Colours.
    pub theme: Theme,
}

/// State of the upload view: session, focus, overlays and selection.
pub struct UploadScreenState {
    session: UploadSession,
    focus: UploadFocus,
    overlay: Overlay,
    history: HistoryListState,
    upload_bindings: Vec<Keybind>,
    history_bindings: Vec<Keybind>,
    options: ScreenOptions,
    tick: usize,
}

impl UploadScreenState {
    /// Creates the view around `session`.
    #[must_use]
    pub fn new(session: UploadSession, options: ScreenOptions) -> Self {
        let mut history = HistoryListState::default();
        history.select_first(session.history().len());
        Self {
            session,
            focus: UploadFocus::Upload,
            overlay: Overlay::None,
            history,
            upload_bindings: keybinding::upload_bindings(),
            history_bindings: keybinding::history_bindings(),
            options,
            tick: 0,
        }
    }

    /// Upload session.
    #[must_use]
    pub const fn session(&self) -> &UploadSession {
        &self.session
    }

    /// Mutable upload session.
    pub const fn session_mut(&mut self) -> &mut UploadSession {
        &mut self.session
    }

    /// Focused pane.
    #[must_use]
    pub const fn focus(&self) -> UploadFocus {
        self.focus
    }

    /// Colours.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.options.theme
    }

    /// Context shown in the footer.
    #[must_use]
    pub const fn focus_context(&self) -> FocusContext {
        match (&self.overlay, self.focus) {
            (Overlay::FileExplorer(_), _) => FocusContext::FileExplorer,
            (Overlay::PathInput(_), _) => FocusContext::PathInput,
            (Overlay::None, UploadFocus::Upload) => FocusContext::Upload,
            (Overlay::None, UploadFocus::History) => FocusContext::History,
        }
    }

    /// Advances the spinner.
    pub const fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Called after the history changed outside a key press.
    pub fn history_changed(&mut self) {
        self.history.select_first(self.session.history().len());
    }

    /// Routes pasted text: into the path field when it is open, otherwise
    /// it is treated as a dropped file.
    pub fn handle_paste(&mut self, text: &str) -> UploadKeyResult {
        match &mut self.overlay {
            Overlay::PathInput(input) => {
                input.insert_str(text.trim());
                UploadKeyResult::Consumed
            }
            Overlay::FileExplorer(_) => UploadKeyResult::Ignored,
            Overlay::None => UploadKeyResult::StageTyped(text.to_string()),
        }
    }

    /// Maps a key press to what the app must do.
    pub fn handle_key(&mut self, key: KeyEvent) -> UploadKeyResult {
        match &mut self.overlay {
            Overlay::FileExplorer(explorer) => {
                return match explorer.handle_key(key) {
                    FileExplorerAction::SelectFile(path) => {
                        self.overlay = Overlay::None;
                        UploadKeyResult::StagePath(path)
                    }
                    FileExplorerAction::Close => {
                        self.overlay = Overlay::None;
                        UploadKeyResult::Consumed
                    }
                    FileExplorerAction::None => UploadKeyResult::Consumed,
                };
            }
            Overlay::PathInput(input) => {
                return match input.handle_key(key) {
                    PathInputAction::Submit(text) => {
                        self.overlay = Overlay::None;
                        UploadKeyResult::StageTyped(text)
                    }
                    PathInputAction::Cancel => {
                        self.overlay = Overlay::None;
                        UploadKeyResult::Consumed
                    }
                    PathInputAction::None => UploadKeyResult::Consumed,
                };
            }
            Overlay::None => {}
        }

        let bindings = match self.focus {
            UploadFocus::Upload => &self.upload_bindings,
            UploadFocus::History => &self.history_bindings,
        };
        let Some(action) = keybinding::resolve(bindings, &key) else {
            return UploadKeyResult::Ignored;
        };
        self.apply(action)
    }

    fn apply(&mut self, action: Action) -> UploadKeyResult {
        match action {
            Action::Quit => UploadKeyResult::Quit,
            Action::Dismiss => UploadKeyResult::Dismiss,
            Action::OpenFileExplorer => {
                self.overlay = Overlay::FileExplorer(FileExplorer::new(
                    self.options.start_dir.clone(),
                    self.options.images_only,
                ));
                UploadKeyResult::Consumed
            }
            Action::EnterPath => {
                self.overlay = Overlay::PathInput(PathInput::new());
                UploadKeyResult::Consumed
            }
            Action::PasteClipboard => UploadKeyResult::PasteClipboard,
            Action::ClearCandidate => {
                self.session.clear();
                UploadKeyResult::Consumed
            }
            Action::Process => match self.session.begin_processing() {
                Ok(job) => UploadKeyResult::Process(job),
                Err(e) => UploadKeyResult::Rejected(e),
            },
            Action::Download => match self.session.current_result() {
                Some(entry) => UploadKeyResult::Download {
                    url: entry.result_url().to_string(),
                    name: entry.suggested_file_name(),
                },
                None => nothing_to_download(),
            },
            Action::CopyResultUrl => match self.session.current_result() {
                Some(entry) => UploadKeyResult::CopyText(entry.result_url().to_string()),
                None => nothing_to_download(),
            },
            Action::FocusHistory => {
                self.focus = self.focus.toggle();
                self.history.clamp(self.session.history().len());
                UploadKeyResult::Consumed
            }
            Action::NavigateUp => {
                self.history.select_previous(self.session.history().len());
                UploadKeyResult::Consumed
            }
            Action::NavigateDown => {
                self.history.select_next(self.session.history().len());
                UploadKeyResult::Consumed
            }
            Action::DownloadEntry => match self.selected_entry() {
                Some((url, name)) => UploadKeyResult::Download { url, name },
                None => UploadKeyResult::Consumed,
            },
            Action::RemoveEntry => self.remove_selected(),
            Action::ClearHistory => self.clear_history(),
        }
    }

    fn selected_entry(&self) -> Option<(String, String)> {
        let index = self.history.selected()?;
        let entry = self.session.history().entries().get(index)?;
        Some((entry.result_url().to_string(), entry.suggested_file_name()))
    }

    fn remove_selected(&mut self) -> UploadKeyResult {
        let Some(id) = self
            .history
            .selected()
            .and_then(|i| self.session.history().entries().get(i))
            .map(|entry| entry.id().clone())
        else {
            return UploadKeyResult::Consumed;
        };

        let result = self.session.remove_entry(&id);
        self.history.clamp(self.session.history().len());
        match result {
            Ok(_) => UploadKeyResult::Consumed,
            Err(e) => history_not_saved(&e),
        }
    }

    fn clear_history(&mut self) -> UploadKeyResult {
        if self.session.history().is_empty() {
            return UploadKeyResult::Consumed;
        }
        let result = self.session.clear_history();
        self.history.clamp(0);
        match result {
            Ok(()) => UploadKeyResult::Notice {
                level: NotificationLevel::Info,
                title: "History cleared",
                body: String::new(),
            },
            Err(e) => history_not_saved(&e),
        }
    }

    fn binding_enabled(&self, binding: &Keybind) -> bool {
        let session = &self.session;
        match binding.action {
            Action::Process => session.can_process(),
            Action::Download | Action::CopyResultUrl => session.current_result().is_some(),
            Action::ClearCandidate => session.candidate().is_some(),
            Action::DownloadEntry | Action::RemoveEntry | Action::ClearHistory => {
                !session.history().is_empty()
            }
            _ => true,
        }
    }
}

fn nothing_to_download() -> UploadKeyResult {
    UploadKeyResult::Notice {
        level: NotificationLevel::Info,
        title: "No result yet",
        body: "Remove a background first".to_string(),
    }
}

fn history_not_saved(error: &crate::domain::errors::HistoryError) -> UploadKeyResult {
    UploadKeyResult::Notice {
        level: NotificationLevel::Warn,
        title: "History not saved",
        body: error.to_string(),
    }
}

/// Renders [`UploadScreenState`].
pub struct UploadScreen;

impl UploadScreen {
    /// Creates the widget.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for UploadScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for UploadScreen {
    type State = UploadScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [header_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        render_header(state, header_area, buf);
        render_content(state, content_area, buf);
        render_footer(state, footer_area, buf);
        render_overlay(state, content_area, buf);
    }
}

fn render_header(state: &UploadScreenState, area: Rect, buf: &mut Buffer) {
    let theme = state.theme();
    Line::from(vec![
        Span::styled(format!(" {NAME} "), theme.title_style.add_modifier(Modifier::REVERSED)),
        Span::styled(format!(" v{VERSION} "), theme.dimmed_style),
        Span::raw(" AI background removal"),
    ])
    .render(area, buf);
}

fn render_content(state: &mut UploadScreenState, area: Rect, buf: &mut Buffer) {
    let [preview_area, history_area] = Layout::horizontal([
        Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        Constraint::Min(0),
    ])
    .areas(area);

    let theme = state.options.theme;
    PreviewPanel::new(&state.session, &theme)
        .focused(state.focus == UploadFocus::Upload)
        .tick(state.tick)
        .render(preview_area, buf);

    HistoryList::new(state.session.history().entries(), &theme)
        .timestamp_format(&state.options.timestamp_format)
        .focused(state.focus == UploadFocus::History)
        .render(history_area, buf, &mut state.history);
}

fn render_footer(state: &UploadScreenState, area: Rect, buf: &mut Buffer) {
    let bindings = match state.focus {
        UploadFocus::Upload => &state.upload_bindings,
        UploadFocus::History => &state.history_bindings,
    };
    let enabled = |binding: &Keybind| state.binding_enabled(binding);
    let count = state.session.history().len();
    let info = format!("{count} processed");

    FooterBar::new(bindings)
        .enabled_when(&enabled)
        .focus_context(state.focus_context())
        .right_info(Some(info.as_str()))
        .style(FooterBarStyle::from_theme(state.theme()))
        .render(area, buf);
}

fn render_overlay(state: &mut UploadScreenState, area: Rect, buf: &mut Buffer) {
    let theme = state.options.theme;
    match &mut state.overlay {
        Overlay::None => {}
        Overlay::FileExplorer(explorer) => {
            let popup = centered(area, 80, 80);
            explorer.render(popup, buf, &theme);
        }
        Overlay::PathInput(input) => {
            let [popup] = Layout::vertical([Constraint::Length(3)])
                .flex(Flex::Center)
                .areas(centered(area, 70, 100));
            ratatui::widgets::Clear.render(popup, buf);
            PathInputView::new(input, &theme).render(popup, buf);
        }
    }
}

fn centered(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ProcessingCompletion;
    use crate::application::services::HistoryStore;
    use crate::domain::entities::{HistoryEntry, ProcessedImage, UploadCandidate};
    use crate::domain::ports::mocks::MockHistoryStorage;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_with(entries: Vec<HistoryEntry>) -> UploadScreenState {
        let storage = Arc::new(MockHistoryStorage::with_entries(entries));
        let session = UploadSession::new(HistoryStore::load(storage));
        UploadScreenState::new(
            session,
            ScreenOptions {
                start_dir: std::env::temp_dir(),
                images_only: true,
                timestamp_format: "%Y-%m-%d %H:%M".to_string(),
                theme: Theme::default(),
            },
        )
    }

    fn stage(state: &mut UploadScreenState) {
        state
            .session_mut()
            .stage(UploadCandidate::new("cat.png", "image/png", vec![1u8; 8]).unwrap());
    }

    #[test]
    fn test_process_without_candidate_is_rejected() {
        let mut state = screen_with(Vec::new());

        let result = state.handle_key(key(KeyCode::Enter));

        assert!(matches!(result, UploadKeyResult::Rejected(UploadError::NothingStaged)));
    }

    #[test]
    fn test_second_process_while_in_flight_is_rejected() {
        let mut state = screen_with(Vec::new());
        stage(&mut state);

        assert!(matches!(
            state.handle_key(key(KeyCode::Enter)),
            UploadKeyResult::Process(_)
        ));
        assert!(matches!(
            state.handle_key(key(KeyCode::Char('p'))),
            UploadKeyResult::Rejected(UploadError::AlreadyProcessing)
        ));
    }

    #[test]
    fn test_download_uses_current_result() {
        let mut state = screen_with(Vec::new());
        stage(&mut state);
        let UploadKeyResult::Process(job) = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a job");
        };
        state.session_mut().complete_processing(ProcessingCompletion::new(
            &job,
            Ok(ProcessedImage::new("https://host/cut.png")),
        ));

        match state.handle_key(key(KeyCode::Char('d'))) {
            UploadKeyResult::Download { url, name } => {
                assert_eq!(url, "https://host/cut.png");
                assert_eq!(name, "cat.png");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_history_navigation_and_removal() {
        let mut state = screen_with(vec![
            HistoryEntry::at("b.png", "https://host/b.png", 2),
            HistoryEntry::at("a.png", "https://host/a.png", 1),
        ]);

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.focus(), UploadFocus::History);
        assert_eq!(state.focus_context(), FocusContext::History);

        state.handle_key(key(KeyCode::Down));
        match state.handle_key(key(KeyCode::Enter)) {
            UploadKeyResult::Download { url, .. } => assert_eq!(url, "https://host/a.png"),
            other => panic!("unexpected result: {other:?}"),
        }

        state.handle_key(key(KeyCode::Char('r')));
        assert_eq!(state.session().history().len(), 1);
        assert_eq!(state.history.selected(), Some(0));
    }

    #[test]
    fn test_clear_history_requires_shift() {
        let mut state = screen_with(vec![HistoryEntry::at("a.png", "https://host/a.png", 1)]);
        state.handle_key(key(KeyCode::Tab));

        state.handle_key(key(KeyCode::Char('c')));
        assert_eq!(state.session().history().len(), 1);

        state.handle_key(KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT));
        assert!(state.session().history().is_empty());
    }

    #[test]
    fn test_path_input_overlay_submits_typed_path() {
        let mut state = screen_with(Vec::new());

        state.handle_key(key(KeyCode::Char('i')));
        assert_eq!(state.focus_context(), FocusContext::PathInput);
        assert!(matches!(
            state.handle_paste("/tmp/cat.png\n"),
            UploadKeyResult::Consumed
        ));

        match state.handle_key(key(KeyCode::Enter)) {
            UploadKeyResult::StageTyped(text) => assert_eq!(text, "/tmp/cat.png"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(state.focus_context(), FocusContext::Upload);
    }

    #[test]
    fn test_paste_without_overlay_stages_dropped_text() {
        let mut state = screen_with(Vec::new());

        assert!(matches!(
            state.handle_paste("'/tmp/my cat.png'"),
            UploadKeyResult::StageTyped(_)
        ));
    }

    #[test]
    fn test_quit_key_types_into_path_input() {
        let mut state = screen_with(Vec::new());
        state.handle_key(key(KeyCode::Char('i')));

        assert!(matches!(
            state.handle_key(key(KeyCode::Char('q'))),
            UploadKeyResult::Consumed
        ));
        assert!(matches!(
            state.handle_key(key(KeyCode::Esc)),
            UploadKeyResult::Consumed
        ));
        assert!(matches!(
            state.handle_key(key(KeyCode::Char('q'))),
            UploadKeyResult::Quit
        ));
    }

    #[test]
    fn test_disabled_bindings_follow_session() {
        let mut state = screen_with(Vec::new());
        let process = state
            .upload_bindings
            .iter()
            .find(|b| b.action == Action::Process)
            .cloned()
            .unwrap();

        assert!(!state.binding_enabled(&process));
        stage(&mut state);
        assert!(state.binding_enabled(&process));
    }

    #[test]
    fn test_renders_without_panicking() {
        let mut state = screen_with(vec![HistoryEntry::at("a.png", "https://host/a.png", 1)]);
        state.handle_key(key(KeyCode::Char('i')));
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);

        UploadScreen::new().render(area, &mut buf, &mut state);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("snapcut"));
        assert!(text.contains("History (1)"));
        assert!(text.contains("Image path"));
    }
}
