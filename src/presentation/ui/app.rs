//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::CompletionOutcome;
use crate::application::services::{
    ClipboardCapture, DownloadResolver, HistoryStore, NotificationManager, UploadSession,
};
use crate::application::use_cases::{ProcessImageUseCase, StageUploadUseCase};
use crate::domain::NotificationLevel;
use crate::domain::entities::UploadCandidate;
use crate::domain::errors::UploadError;
use crate::domain::ports::{
    ClipboardPort, DownloadReceipt, DownloadStrategy, HistoryStoragePort, NotificationPort,
    ProcessingPort,
};
use crate::presentation::events::{InputEvent, is_quit_event};
use crate::presentation::ui::backend::{Action, Backend, BackendCommand, ChannelNotifier, Workers};
use crate::presentation::ui::notification_popup::NotificationPopup;
use crate::presentation::ui::paste_guard::PasteGuard;
use crate::presentation::ui::upload_screen::{
    ScreenOptions, UploadKeyResult, UploadScreen, UploadScreenState,
};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Adapters the app is wired with.
pub struct AppPorts {
    /// Background removal service.
    pub processing: Arc<dyn ProcessingPort>,
    /// System clipboard.
    pub clipboard: Arc<dyn ClipboardPort>,
    /// History persistence.
    pub history: Arc<dyn HistoryStoragePort>,
    /// First download strategy.
    pub direct_download: Arc<dyn DownloadStrategy>,
    /// Strategy used when the direct one fails.
    pub fallback_download: Arc<dyn DownloadStrategy>,
    /// Desktop notifications for outcomes.
    pub desktop: Arc<dyn NotificationPort>,
}

/// Runtime settings taken from the configuration.
pub struct AppSettings {
    /// Processing timeout.
    pub processing_timeout: Duration,
    /// How long toasts stay.
    pub notification_duration: Duration,
    /// Upload view options.
    pub screen: ScreenOptions,
}

/// Interactive upload view.
pub struct App {
    running: bool,
    screen: UploadScreenState,
    notifications: NotificationManager,
    desktop: Arc<dyn NotificationPort>,
    command_tx: mpsc::UnboundedSender<BackendCommand>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    backend: Option<Backend>,
}

impl App {
    /// Wires the backend workers and loads the history.
    #[must_use]
    pub fn new(ports: AppPorts, settings: AppSettings) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let clipboard = ClipboardCapture::new(ports.clipboard);
        let workers = Workers {
            stage: Arc::new(StageUploadUseCase::new(clipboard.clone())),
            process: Arc::new(ProcessImageUseCase::new(
                ports.processing,
                settings.processing_timeout,
            )),
            downloads: DownloadResolver::new(
                ports.direct_download,
                ports.fallback_download,
                Arc::new(ChannelNotifier::new(action_tx.clone())),
            ),
            clipboard,
        };
        let backend = Backend::new(workers, command_rx, action_tx);

        let session = UploadSession::new(HistoryStore::load(ports.history));
        info!(entries = session.history().len(), "Session ready");

        Self {
            running: true,
            screen: UploadScreenState::new(session, settings.screen),
            notifications: NotificationManager::new(settings.notification_duration),
            desktop: ports.desktop,
            command_tx,
            action_rx,
            backend: Some(backend),
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be drawn or read.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if let Some(backend) = self.backend.take() {
            tokio::spawn(backend.run());
        }
        let _paste = PasteGuard::enable()?;

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut ticker = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                event = terminal_events.next() => match event {
                    Some(Ok(event)) => self.handle_input(InputEvent::from(event)),
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                _ = ticker.tick() => {
                    self.screen.tick();
                    self.notifications.tick();
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_stateful_widget(UploadScreen::new(), area, &mut self.screen);

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification, self.screen.theme()), area);
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        let result = match event {
            InputEvent::Key(key) if is_quit_event(&key) => UploadKeyResult::Quit,
            InputEvent::Key(key) => self.screen.handle_key(key),
            InputEvent::Paste(text) => self.screen.handle_paste(&text),
            InputEvent::Resize | InputEvent::Ignored => UploadKeyResult::Ignored,
        };
        self.apply_key_result(result);
    }

    fn apply_key_result(&mut self, result: UploadKeyResult) {
        match result {
            UploadKeyResult::Consumed | UploadKeyResult::Ignored => {}
            UploadKeyResult::Quit => self.running = false,
            UploadKeyResult::Dismiss => {
                self.notifications.dismiss();
            }
            UploadKeyResult::StagePath(path) => self.send(BackendCommand::StagePath(path)),
            UploadKeyResult::StageTyped(text) => self.send(BackendCommand::StageDropped(text)),
            UploadKeyResult::PasteClipboard => self.send(BackendCommand::PasteClipboard),
            UploadKeyResult::Process(job) => {
                self.notifications
                    .info("Removing background", job.candidate.display_name());
                self.send(BackendCommand::Process(job));
            }
            UploadKeyResult::Rejected(e) => self.notifications.upload_error(&e),
            UploadKeyResult::Download { url, name } => {
                self.send(BackendCommand::Download { url, name });
            }
            UploadKeyResult::CopyText(text) => self.send(BackendCommand::CopyText(text)),
            UploadKeyResult::Notice { level, title, body } => {
                self.notifications.notify(level, title, body);
            }
        }
    }

    fn send(&self, command: BackendCommand) {
        if self.command_tx.send(command).is_err() {
            error!("Backend worker is gone, command dropped");
        }
    }

    fn stage(&mut self, candidate: UploadCandidate) {
        let ticket = self.screen.session_mut().stage(candidate.clone());
        self.send(BackendCommand::RenderPreview { ticket, candidate });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::PreviewRendered { ticket, preview } => match preview {
                Ok(preview) => {
                    self.screen.session_mut().apply_preview(ticket, Some(preview));
                }
                Err(e) => {
                    if self.screen.session_mut().apply_preview(ticket, None) {
                        self.notifications.warn("Preview unavailable", e.to_string());
                    }
                }
            },
            Action::ProcessingFinished(completion) => {
                let outcome = self.screen.session_mut().complete_processing(completion);
                self.report_outcome(outcome);
            }
            Action::Downloaded(result) => match result {
                Ok(DownloadReceipt::Saved(path)) => {
                    let shown = path.display().to_string();
                    self.notifications.success("Download complete", shown.as_str());
                    self.desktop
                        .send(NotificationLevel::Success, "Download complete", &shown);
                }
                Ok(DownloadReceipt::Dispatched { url }) => {
                    debug!(%url, "Download handed to the browser");
                }
                Err(e) => {
                    warn!(error = %e, "Download failed");
                    self.notifications.error("Download failed", e.to_string());
                }
            },
            Action::ClipboardRead(result) => match result {
                Ok(Some(candidate)) => self.stage(candidate),
                Ok(None) => self
                    .notifications
                    .info("Nothing to paste", "The clipboard holds no image"),
                Err(e) => self.reject(e),
            },
            Action::Staged(result) => match result {
                Ok(candidate) => self.stage(candidate),
                Err(e) => self.reject(e),
            },
            Action::Notify { level, title, body } => {
                self.notifications.notify(level, title, body);
            }
        }
    }

    fn reject(&mut self, error: UploadError) {
        self.notifications.upload_error(&error);
        self.screen.session_mut().reject(error);
    }

    fn report_outcome(&mut self, outcome: CompletionOutcome) {
        match outcome {
            CompletionOutcome::Succeeded {
                entry,
                current,
                persist_error,
            } => {
                self.screen.history_changed();
                if current {
                    self.notifications
                        .success("Background removed", entry.original_name());
                } else {
                    self.notifications
                        .info("Earlier upload finished", entry.original_name());
                }
                self.desktop.send(
                    NotificationLevel::Success,
                    "Background removed",
                    entry.original_name(),
                );
                if let Some(e) = persist_error {
                    self.notifications.warn("History not saved", e.to_string());
                }
            }
            CompletionOutcome::Failed { error, current } => {
                debug!(current, "Reporting processing failure");
                self.notifications.upload_error(&error);
                self.desktop
                    .send(NotificationLevel::Error, error.title(), &error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::{Preview, ProcessingCompletion, Ticket};
    use crate::application::services::PreviewError;
    use crate::domain::entities::ProcessedImage;
    use crate::domain::errors::{DownloadError, ProcessingFailure};
    use crate::domain::ports::mocks::{
        MockClipboard, MockDownloadStrategy, MockHistoryStorage, MockNotificationPort,
        MockProcessingPort,
    };
    use crate::presentation::theme::Theme;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Harness {
        app: App,
        history: Arc<MockHistoryStorage>,
        desktop: Arc<MockNotificationPort>,
    }

    fn harness() -> Harness {
        let history = Arc::new(MockHistoryStorage::new());
        let desktop = Arc::new(MockNotificationPort::new());
        let app = App::new(
            AppPorts {
                processing: Arc::new(MockProcessingPort::succeeding("https://host/r.png")),
                clipboard: Arc::new(MockClipboard::default()),
                history: history.clone(),
                direct_download: Arc::new(MockDownloadStrategy::new()),
                fallback_download: Arc::new(MockDownloadStrategy::new()),
                desktop: desktop.clone(),
            },
            AppSettings {
                processing_timeout: Duration::from_secs(5),
                notification_duration: Duration::from_secs(5),
                screen: ScreenOptions {
                    start_dir: std::env::temp_dir(),
                    images_only: true,
                    timestamp_format: "%H:%M".to_string(),
                    theme: Theme::default(),
                },
            },
        );
        Harness {
            app,
            history,
            desktop,
        }
    }

    fn candidate() -> UploadCandidate {
        UploadCandidate::new("cat.png", "image/png", vec![1u8; 8]).unwrap()
    }

    fn press(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn latest_title(app: &App) -> Option<String> {
        app.notifications
            .current_notification()
            .map(|n| n.title.clone())
    }

    #[test]
    fn test_staged_file_queues_preview() {
        let mut h = harness();

        h.app.handle_action(Action::Staged(Ok(candidate())));

        assert_eq!(h.app.screen.session().candidate().unwrap().display_name(), "cat.png");
        match h.app.backend.as_mut().unwrap().try_next_command() {
            Some(BackendCommand::RenderPreview { ticket, .. }) => {
                assert_eq!(ticket, Ticket::new(1));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejected_file_notifies_and_keeps_nothing_staged() {
        let mut h = harness();

        h.app
            .handle_action(Action::Staged(Err(UploadError::invalid_format("image/gif"))));

        assert!(h.app.screen.session().candidate().is_none());
        assert_eq!(latest_title(&h.app).as_deref(), Some("Invalid format"));
    }

    #[test]
    fn test_stale_preview_failure_is_silent() {
        let mut h = harness();
        h.app.handle_action(Action::Staged(Ok(candidate())));
        h.app.handle_action(Action::Staged(Ok(candidate())));

        h.app.handle_action(Action::PreviewRendered {
            ticket: Ticket::new(1),
            preview: Err(PreviewError::Undecodable("bad".to_string())),
        });
        assert!(h.app.notifications.is_empty());

        h.app.handle_action(Action::PreviewRendered {
            ticket: Ticket::new(2),
            preview: Ok(Preview::new("data:image/png;base64,AA".to_string(), (1, 1))),
        });
        assert!(h.app.notifications.is_empty());
    }

    #[test]
    fn test_process_round_trip_records_history() {
        let mut h = harness();
        h.app.handle_action(Action::Staged(Ok(candidate())));

        h.app.handle_input(press(KeyCode::Enter));
        assert!(h.app.screen.session().is_processing());

        let job = crate::application::dto::ProcessingJob {
            ticket: Ticket::new(1),
            candidate: candidate(),
        };
        h.app
            .handle_action(Action::ProcessingFinished(ProcessingCompletion::new(
                &job,
                Ok(ProcessedImage::new("https://host/r.png")),
            )));

        assert_eq!(h.history.persisted().len(), 1);
        assert_eq!(h.desktop.titles(), ["Background removed"]);
        assert!(!h.app.screen.session().is_processing());
    }

    #[test]
    fn test_failed_processing_is_reported() {
        let mut h = harness();
        h.app.handle_action(Action::Staged(Ok(candidate())));
        h.app.handle_input(press(KeyCode::Enter));

        let job = crate::application::dto::ProcessingJob {
            ticket: Ticket::new(1),
            candidate: candidate(),
        };
        h.app
            .handle_action(Action::ProcessingFinished(ProcessingCompletion::new(
                &job,
                Err(ProcessingFailure::MissingResultUrl),
            )));

        assert!(h.history.persisted().is_empty());
        assert_eq!(h.desktop.titles(), ["Processing failed"]);
        assert!(h.app.screen.session().can_process());
    }

    #[test]
    fn test_download_failure_notifies() {
        let mut h = harness();

        h.app.handle_action(Action::Downloaded(Err(DownloadError::network("offline"))));

        assert!(h.app.notifications.has_notifications());
    }

    #[test]
    fn test_ctrl_c_quits_from_path_input() {
        let mut h = harness();
        h.app.handle_input(press(KeyCode::Char('i')));
        h.app.handle_input(press(KeyCode::Char('q')));
        assert!(h.app.running);

        h.app.handle_input(InputEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));

        assert!(!h.app.running);
    }
}
