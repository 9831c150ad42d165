//! Download error types.

use thiserror::Error;

/// Download error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum DownloadError {
    #[error("invalid download url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("server answered with HTTP {status}")]
    Status { status: u16 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("could not save file: {message}")]
    Io { message: String },

    #[error("could not open browser: {message}")]
    Browser { message: String },
}

impl DownloadError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates io error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Stable error category.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        "download-failed"
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
