//! Data transfer objects for the application layer.

mod preview;
mod processing_dto;

pub use preview::{Preview, PreviewState};
pub use processing_dto::{CompletionOutcome, ProcessingCompletion, ProcessingJob, Ticket};
