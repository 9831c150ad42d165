//! Clipboard error types.

use thiserror::Error;

/// Clipboard access failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {message}")]
    Unavailable { message: String },

    #[error("could not write clipboard: {message}")]
    Write { message: String },
}

impl ClipboardError {
    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates write error.
    #[must_use]
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Stable error category.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        "clipboard-failed"
    }
}
