//! Transient status messages shown as toasts, on stderr or on the desktop.

use std::time::{Duration, Instant};

use super::errors::UploadError;

const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationLevel {
    /// Progress and neutral information.
    Info,
    /// A file was processed, saved or copied.
    Success,
    /// Something degraded but the flow can continue.
    Warn,
    /// The requested operation failed.
    Error,
}

impl NotificationLevel {
    /// Short tag used in line-oriented output.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "done",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Whether the message reports a problem the user should read.
    #[must_use]
    pub const fn is_problem(self) -> bool {
        matches!(self, Self::Warn | Self::Error)
    }

    /// How long a desktop notification of this level stays up.
    #[must_use]
    pub const fn desktop_timeout(self) -> Duration {
        if self.is_problem() {
            Duration::from_secs(10)
        } else {
            Duration::from_secs(5)
        }
    }
}

/// A queued toast.
///
/// The display clock starts on [`Notification::mark_displayed`], so a toast
/// waiting behind another one does not expire unseen.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Short headline.
    pub title: String,
    /// Detail line.
    pub message: String,
    /// When the toast first became visible.
    pub displayed_at: Option<Instant>,
    /// Visible time before expiry.
    pub duration: Duration,
}

impl Notification {
    /// Creates a toast with the default duration.
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            displayed_at: None,
            duration: TOAST_DURATION,
        }
    }

    /// Error toast for a rejected or failed upload.
    #[must_use]
    pub fn upload_failure(error: &UploadError) -> Self {
        Self::new(NotificationLevel::Error, error.title(), error.to_string())
    }

    /// Overrides the visible time.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast has been visible longer than its duration.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the display clock once.
    pub fn mark_displayed(&mut self) {
        self.displayed_at.get_or_insert_with(Instant::now);
    }
}
