//! State owned by the upload view.

use tracing::{debug, info, warn};

use crate::application::dto::{
    CompletionOutcome, Preview, PreviewState, ProcessingCompletion, ProcessingJob, Ticket,
};
use crate::application::services::HistoryStore;
use crate::domain::entities::{EntryId, HistoryEntry, UploadCandidate};
use crate::domain::errors::{HistoryError, UploadError};

/// Processing state of the staged candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A request for the ticketed candidate is pending.
    InFlight(Ticket),
    /// The staged candidate has a result.
    Succeeded,
}

/// Staged file, its preview and processing state, and the result history.
///
/// All mutations happen on the UI task; async work reports back through
/// tickets so stale completions can be told apart.
pub struct UploadSession {
    candidate: Option<UploadCandidate>,
    ticket: Ticket,
    preview: PreviewState,
    state: ProcessingState,
    current_result: Option<HistoryEntry>,
    last_error: Option<UploadError>,
    history: HistoryStore,
}

impl UploadSession {
    /// Creates an empty session around a loaded history.
    #[must_use]
    pub fn new(history: HistoryStore) -> Self {
        Self {
            candidate: None,
            ticket: Ticket::default(),
            preview: PreviewState::Empty,
            state: ProcessingState::Idle,
            current_result: None,
            last_error: None,
            history,
        }
    }

    /// Staged file, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    /// Preview of the staged file.
    #[must_use]
    pub const fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Processing state of the staged file.
    #[must_use]
    pub const fn state(&self) -> ProcessingState {
        self.state
    }

    /// Result of the staged file once processed.
    #[must_use]
    pub const fn current_result(&self) -> Option<&HistoryEntry> {
        self.current_result.as_ref()
    }

    /// Last error shown for the staged file.
    #[must_use]
    pub const fn last_error(&self) -> Option<&UploadError> {
        self.last_error.as_ref()
    }

    /// Processed images, newest first.
    #[must_use]
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self.state, ProcessingState::InFlight(_))
    }

    /// Whether the process control is enabled.
    #[must_use]
    pub const fn can_process(&self) -> bool {
        self.candidate.is_some() && !self.is_processing()
    }

    /// Stages a validated candidate, replacing any previous one.
    ///
    /// Returns the ticket the preview render must report back with.
    pub fn stage(&mut self, candidate: UploadCandidate) -> Ticket {
        if let ProcessingState::InFlight(ticket) = self.state {
            debug!(%ticket, "Replacing candidate while processing, request orphaned");
        }
        self.ticket = self.ticket.next();
        info!(
            ticket = %self.ticket,
            name = candidate.display_name(),
            size = candidate.size(),
            media_type = %candidate.media_type(),
            "Candidate staged"
        );
        self.candidate = Some(candidate);
        self.preview = PreviewState::Rendering;
        self.state = ProcessingState::Idle;
        self.current_result = None;
        self.last_error = None;
        self.ticket
    }

    /// Records a rejected file. Nothing is staged and the previous candidate stays.
    pub fn reject(&mut self, error: UploadError) {
        debug!(category = error.category(), "Candidate rejected");
        self.last_error = Some(error);
    }

    /// Discards the candidate, its preview and its result.
    pub fn clear(&mut self) {
        self.ticket = self.ticket.next();
        self.candidate = None;
        self.preview = PreviewState::Empty;
        self.state = ProcessingState::Idle;
        self.current_result = None;
        self.last_error = None;
    }

    /// Applies a finished preview render.
    ///
    /// Returns `false` when the render belongs to a superseded candidate.
    pub fn apply_preview(&mut self, ticket: Ticket, preview: Option<Preview>) -> bool {
        if ticket != self.ticket || self.candidate.is_none() {
            debug!(%ticket, current = %self.ticket, "Dropping stale preview");
            return false;
        }
        self.preview = preview.map_or(PreviewState::Unavailable, PreviewState::Ready);
        true
    }

    /// Moves from `Idle` to `InFlight` and hands out the job to run.
    ///
    /// # Errors
    /// Returns [`UploadError::NothingStaged`] or [`UploadError::AlreadyProcessing`].
    pub fn begin_processing(&mut self) -> Result<ProcessingJob, UploadError> {
        let Some(candidate) = &self.candidate else {
            return Err(UploadError::NothingStaged);
        };
        if self.is_processing() {
            return Err(UploadError::AlreadyProcessing);
        }

        self.state = ProcessingState::InFlight(self.ticket);
        self.last_error = None;
        info!(ticket = %self.ticket, name = candidate.display_name(), "Processing started");

        Ok(ProcessingJob {
            ticket: self.ticket,
            candidate: candidate.clone(),
        })
    }

    /// Applies the answer of a processing round trip.
    ///
    /// Success always records one history entry; failure never does. A
    /// completion for a superseded candidate leaves the current state alone.
    pub fn complete_processing(&mut self, completion: ProcessingCompletion) -> CompletionOutcome {
        let current = self.state == ProcessingState::InFlight(completion.ticket);

        match completion.result {
            Ok(processed) => {
                let entry = HistoryEntry::new(completion.original_name, processed.into_result_url());
                let persist_error = self.history.append(entry.clone()).err();

                if current {
                    self.state = ProcessingState::Succeeded;
                    self.current_result = Some(entry.clone());
                }
                info!(id = %entry.id(), current, "Processing succeeded");

                CompletionOutcome::Succeeded {
                    entry,
                    current,
                    persist_error,
                }
            }
            Err(failure) => {
                let error = UploadError::from(failure);
                warn!(ticket = %completion.ticket, error = %error, current, "Processing failed");

                if current {
                    self.state = ProcessingState::Idle;
                    self.last_error = Some(error.clone());
                }

                CompletionOutcome::Failed { error, current }
            }
        }
    }

    /// Removes one history entry.
    ///
    /// # Errors
    /// Returns error if the history could not be persisted.
    pub fn remove_entry(&mut self, id: &EntryId) -> Result<Option<HistoryEntry>, HistoryError> {
        self.history.remove(id)
    }

    /// Empties the history.
    ///
    /// # Errors
    /// Returns error if the history could not be persisted.
    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.history.clear()
    }
}
