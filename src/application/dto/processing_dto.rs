//! Processing DTOs.

use std::fmt;

use crate::domain::entities::{HistoryEntry, ProcessedImage, UploadCandidate};
use crate::domain::errors::{HistoryError, ProcessingFailure, UploadError};

/// Generation number tying an async completion to the candidate that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// Creates a ticket with a raw generation number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Ticket of the next generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work handed to the processing worker.
#[derive(Debug, Clone)]
pub struct ProcessingJob {
    /// Generation of the candidate when the job started.
    pub ticket: Ticket,
    /// File to process.
    pub candidate: UploadCandidate,
}

/// Result reported back by the processing worker.
#[derive(Debug, Clone)]
pub struct ProcessingCompletion {
    /// Ticket of the job.
    pub ticket: Ticket,
    /// Display name of the processed file.
    pub original_name: String,
    /// Service answer.
    pub result: Result<ProcessedImage, ProcessingFailure>,
}

impl ProcessingCompletion {
    /// Pairs a worker result with the job that produced it.
    #[must_use]
    pub fn new(job: &ProcessingJob, result: Result<ProcessedImage, ProcessingFailure>) -> Self {
        Self {
            ticket: job.ticket,
            original_name: job.candidate.display_name().to_string(),
            result,
        }
    }
}

/// What a completion did to the session.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// A history entry was recorded.
    Succeeded {
        entry: HistoryEntry,
        /// Whether the result belongs to the candidate still on screen.
        current: bool,
        /// Set when the history list could not be written.
        persist_error: Option<HistoryError>,
    },
    /// Nothing was recorded; `error` must be shown.
    Failed {
        error: UploadError,
        current: bool,
    },
}

impl CompletionOutcome {
    /// Whether a history entry was recorded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}
