//! Upload and processing error types.

use thiserror::Error;

/// Reasons a processing round trip failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ProcessingFailure {
    #[error("service answered with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode service response: {message}")]
    Decode { message: String },

    #[error("service response did not contain a result url")]
    MissingResultUrl,

    #[error("service returned an unusable result url: {url}")]
    InvalidResultUrl { url: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("no response within {after_secs}s")]
    Timeout { after_secs: u64 },
}

impl ProcessingFailure {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns whether the remote answered at all.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Status { .. }
                | Self::Decode { .. }
                | Self::MissingResultUrl
                | Self::InvalidResultUrl { .. }
        )
    }
}

/// Errors reported while staging or processing a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum UploadError {
    #[error("unsupported format {media_type}: only JPG, PNG and WebP are supported")]
    InvalidFormat { media_type: String },

    #[error("file is {size} bytes, maximum is {limit} bytes (10 MB)")]
    TooLarge { size: u64, limit: u64 },

    #[error("cannot read {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("no file is staged")]
    NothingStaged,

    #[error("this file is already being processed")]
    AlreadyProcessing,

    #[error("processing failed: {0}")]
    ProcessingFailed(#[from] ProcessingFailure),
}

impl UploadError {
    /// Creates invalid format error.
    #[must_use]
    pub fn invalid_format(media_type: impl Into<String>) -> Self {
        Self::InvalidFormat {
            media_type: media_type.into(),
        }
    }

    /// Creates unreadable file error.
    #[must_use]
    pub fn unreadable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Stable category string.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "invalid-format",
            Self::TooLarge { .. } => "too-large",
            Self::Unreadable { .. } => "unreadable-file",
            Self::NothingStaged => "nothing-staged",
            Self::AlreadyProcessing => "already-processing",
            Self::ProcessingFailed(_) => "processing-failed",
        }
    }

    /// Short title for notifications.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "Invalid format",
            Self::TooLarge { .. } => "File too large",
            Self::Unreadable { .. } => "Cannot open file",
            Self::NothingStaged => "Nothing to process",
            Self::AlreadyProcessing => "Still processing",
            Self::ProcessingFailed(_) => "Processing failed",
        }
    }

    /// Returns whether the error was raised before any request was made.
    #[must_use]
    pub const fn is_preflight(&self) -> bool {
        !matches!(self, Self::ProcessingFailed(_))
    }
}
