//! HTTP client for the background removal webhook.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use super::dto::ProcessResponse;
use crate::domain::entities::{ProcessedImage, UploadCandidate};
use crate::domain::errors::ProcessingFailure;
use crate::domain::ports::ProcessingPort;

const USER_AGENT: &str = concat!("snapcut/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Posts raw image bytes to the webhook and decodes the result location.
pub struct WebhookProcessingClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl WebhookProcessingClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProcessingFailure> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ProcessingFailure::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: &reqwest::Error) -> ProcessingFailure {
        warn!(error = %e, endpoint = %self.endpoint, "Failed to reach processing endpoint");
        if e.is_timeout() {
            ProcessingFailure::Timeout {
                after_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ProcessingFailure::network("failed to connect to the processing service")
        } else {
            ProcessingFailure::network(e.to_string())
        }
    }
}

#[async_trait]
impl ProcessingPort for WebhookProcessingClient {
    async fn process(
        &self,
        candidate: &UploadCandidate,
    ) -> Result<ProcessedImage, ProcessingFailure> {
        debug!(
            endpoint = %self.endpoint,
            size = candidate.size(),
            content_type = candidate.declared_type(),
            "Posting image"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, candidate.declared_type())
            .body(candidate.payload().clone())
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_send_error(&e))?;

        if !status.is_success() {
            let message: String = String::from_utf8_lossy(&body)
                .trim()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            warn!(status = status.as_u16(), "Processing endpoint rejected the image");
            return Err(ProcessingFailure::Status {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("error").to_string()
                } else {
                    message
                },
            });
        }

        let decoded: ProcessResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse processing response");
            ProcessingFailure::decode(e.to_string())
        })?;

        let image = decoded.into_processed()?;
        debug!(url = image.result_url(), "Processing endpoint answered");
        Ok(image)
    }
}
