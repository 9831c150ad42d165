//! Round trip to the background removal service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::dto::{ProcessingCompletion, ProcessingJob};
use crate::domain::errors::ProcessingFailure;
use crate::domain::ports::ProcessingPort;

/// Default upper bound for one processing request.
pub const DEFAULT_PROCESSING_TIMEOUT: Duration = Duration::from_secs(120);

/// Sends a staged candidate for processing.
pub struct ProcessImageUseCase {
    processing: Arc<dyn ProcessingPort>,
    timeout: Duration,
}

impl ProcessImageUseCase {
    /// Creates the use case with a round-trip `timeout`.
    #[must_use]
    pub fn new(processing: Arc<dyn ProcessingPort>, timeout: Duration) -> Self {
        Self {
            processing,
            timeout,
        }
    }

    /// Upper bound for one request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `job` and reports its outcome. Never fails on its own; a request
    /// exceeding the timeout reports [`ProcessingFailure::Timeout`].
    pub async fn execute(&self, job: &ProcessingJob) -> ProcessingCompletion {
        debug!(
            ticket = %job.ticket,
            size = job.candidate.size(),
            timeout_secs = self.timeout.as_secs(),
            "Sending candidate for processing"
        );

        let result = tokio::time::timeout(self.timeout, self.processing.process(&job.candidate))
            .await
            .unwrap_or_else(|_| {
                warn!(ticket = %job.ticket, "Processing timed out");
                Err(ProcessingFailure::Timeout {
                    after_secs: self.timeout.as_secs(),
                })
            });

        ProcessingCompletion::new(job, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::Ticket;
    use crate::domain::entities::UploadCandidate;
    use crate::domain::ports::mocks::MockProcessingPort;

    fn job() -> ProcessingJob {
        ProcessingJob {
            ticket: Ticket::new(3),
            candidate: UploadCandidate::new("cat.png", "image/png", vec![1u8; 64]).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_success_carries_ticket_and_name() {
        let port = Arc::new(MockProcessingPort::succeeding("https://host/cut.png"));
        let use_case = ProcessImageUseCase::new(port.clone(), DEFAULT_PROCESSING_TIMEOUT);

        let completion = use_case.execute(&job()).await;

        assert_eq!(completion.ticket, Ticket::new(3));
        assert_eq!(completion.original_name, "cat.png");
        assert_eq!(
            completion.result.unwrap().result_url(),
            "https://host/cut.png"
        );
        assert_eq!(port.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let port = Arc::new(MockProcessingPort::failing(ProcessingFailure::Status {
            status: 500,
            message: "boom".to_string(),
        }));
        let use_case = ProcessImageUseCase::new(port, DEFAULT_PROCESSING_TIMEOUT);

        let completion = use_case.execute(&job()).await;

        assert!(matches!(
            completion.result,
            Err(ProcessingFailure::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_timeout() {
        let port = Arc::new(
            MockProcessingPort::succeeding("https://host/cut.png")
                .with_delay(Duration::from_secs(5)),
        );
        let use_case = ProcessImageUseCase::new(port, Duration::from_millis(20));

        let completion = use_case.execute(&job()).await;

        assert_eq!(
            completion.result,
            Err(ProcessingFailure::Timeout { after_secs: 0 })
        );
    }
}
