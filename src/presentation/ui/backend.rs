//! Worker executing slow commands for the UI.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::dto::{Preview, ProcessingCompletion, ProcessingJob, Ticket};
use crate::application::services::{
    ClipboardCapture, DownloadResolver, PreviewError, render_preview,
};
use crate::application::use_cases::{ProcessImageUseCase, StageUploadUseCase};
use crate::domain::NotificationLevel;
use crate::domain::entities::UploadCandidate;
use crate::domain::errors::{DownloadError, UploadError};
use crate::domain::ports::{DownloadReceipt, NotificationPort};

/// Results sent back to the UI task.
#[derive(Debug)]
pub enum Action {
    /// A preview finished rendering.
    PreviewRendered {
        ticket: Ticket,
        preview: Result<Preview, PreviewError>,
    },
    /// A processing request completed.
    ProcessingFinished(ProcessingCompletion),
    /// A download finished.
    Downloaded(Result<DownloadReceipt, DownloadError>),
    /// The clipboard was read.
    ClipboardRead(Result<Option<UploadCandidate>, UploadError>),
    /// A file was loaded and validated.
    Staged(Result<UploadCandidate, UploadError>),
    /// A service wants a toast shown.
    Notify {
        level: NotificationLevel,
        title: String,
        body: String,
    },
}

/// Work the UI hands off so the event loop never blocks.
#[derive(Debug)]
pub enum BackendCommand {
    /// Render the preview of a ticketed candidate.
    RenderPreview {
        ticket: Ticket,
        candidate: UploadCandidate,
    },
    /// Send a job to the processing endpoint.
    Process(ProcessingJob),
    /// Run the download cascade.
    Download {
        url: String,
        name: String,
    },
    /// Read an image from the clipboard.
    PasteClipboard,
    /// Load and validate a file.
    StagePath(PathBuf),
    /// Load a path pasted by the terminal.
    StageDropped(String),
    /// Copy text to the clipboard.
    CopyText(String),
}

/// Services the backend dispatches to.
#[derive(Clone)]
pub struct Workers {
    /// Staging of files and clipboard images.
    pub stage: Arc<StageUploadUseCase>,
    /// Processing requests.
    pub process: Arc<ProcessImageUseCase>,
    /// Download cascade.
    pub downloads: DownloadResolver,
    /// Clipboard access.
    pub clipboard: ClipboardCapture,
}

/// Runs [`BackendCommand`]s off the UI task.
pub struct Backend {
    workers: Workers,
    command_rx: mpsc::UnboundedReceiver<BackendCommand>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Backend {
    /// Creates a backend reading `command_rx` and answering on `action_tx`.
    #[must_use]
    pub const fn new(
        workers: Workers,
        command_rx: mpsc::UnboundedReceiver<BackendCommand>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            workers,
            command_rx,
            action_tx,
        }
    }

    /// Runs until every command sender is dropped. Each command gets its own
    /// task so a slow request never holds up previews or pastes.
    pub async fn run(mut self) {
        info!("Backend worker started");
        while let Some(command) = self.command_rx.recv().await {
            let workers = self.workers.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move { handle_command(&workers, command, &tx).await });
        }
        info!("Backend worker stopped");
    }

    #[cfg(test)]
    pub fn try_next_command(&mut self) -> Option<BackendCommand> {
        self.command_rx.try_recv().ok()
    }
}

async fn handle_command(
    workers: &Workers,
    command: BackendCommand,
    tx: &mpsc::UnboundedSender<Action>,
) {
    let action = match command {
        BackendCommand::RenderPreview { ticket, candidate } => {
            let preview = render_preview(&candidate).await;
            if let Err(e) = &preview {
                warn!(%ticket, error = %e, "Preview rendering failed");
            }
            Action::PreviewRendered { ticket, preview }
        }
        BackendCommand::Process(job) => {
            debug!(ticket = %job.ticket, name = job.candidate.display_name(), "Processing started");
            Action::ProcessingFinished(workers.process.execute(&job).await)
        }
        BackendCommand::Download { url, name } => {
            Action::Downloaded(workers.downloads.download(&url, &name).await)
        }
        BackendCommand::PasteClipboard => {
            Action::ClipboardRead(workers.stage.from_clipboard().await)
        }
        BackendCommand::StagePath(path) => Action::Staged(workers.stage.from_path(&path).await),
        BackendCommand::StageDropped(text) => {
            Action::Staged(workers.stage.from_dropped_text(&text).await)
        }
        BackendCommand::CopyText(text) => match workers.clipboard.copy_text(text).await {
            Ok(()) => Action::Notify {
                level: NotificationLevel::Success,
                title: "Copied".to_string(),
                body: "Result link copied to the clipboard".to_string(),
            },
            Err(e) => {
                warn!(error = %e, "Copy to clipboard failed");
                Action::Notify {
                    level: NotificationLevel::Error,
                    title: "Copy failed".to_string(),
                    body: e.to_string(),
                }
            }
        },
    };

    if tx.send(action).is_err() {
        debug!("UI closed before a backend result arrived");
    }
}

/// Routes notifications from services into the UI's toast queue.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Action>,
}

impl ChannelNotifier {
    #[must_use]
    pub const fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { tx }
    }
}

impl NotificationPort for ChannelNotifier {
    fn send(&self, level: NotificationLevel, title: &str, body: &str) {
        let _ = self.tx.send(Action::Notify {
            level,
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
