//! Processing port definition.

use async_trait::async_trait;

use crate::domain::entities::{ProcessedImage, UploadCandidate};
use crate::domain::errors::ProcessingFailure;

/// Port for the remote background removal service.
#[async_trait]
pub trait ProcessingPort: Send + Sync {
    /// Sends the candidate payload and waits for the result location.
    async fn process(&self, candidate: &UploadCandidate)
    -> Result<ProcessedImage, ProcessingFailure>;
}
