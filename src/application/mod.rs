//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Stateful services shared by the views.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{CompletionOutcome, Preview, PreviewState, ProcessingCompletion, ProcessingJob, Ticket};
pub use use_cases::{ProcessImageUseCase, StageUploadUseCase};
