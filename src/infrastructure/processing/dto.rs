//! Wire types of the processing endpoint.

use reqwest::Url;
use serde::Deserialize;

use crate::domain::entities::ProcessedImage;
use crate::domain::errors::ProcessingFailure;

/// Body returned by the removal webhook. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    /// Location of the cut-out.
    #[serde(default)]
    pub url: Option<String>,
}

impl ProcessResponse {
    /// Accepts the answer only if `url` is a non-empty absolute http(s) URL.
    ///
    /// # Errors
    /// Returns [`ProcessingFailure::MissingResultUrl`] or
    /// [`ProcessingFailure::InvalidResultUrl`].
    pub fn into_processed(self) -> Result<ProcessedImage, ProcessingFailure> {
        let url = self
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ProcessingFailure::MissingResultUrl)?;

        match Url::parse(&url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
                Ok(ProcessedImage::new(url))
            }
            _ => Err(ProcessingFailure::InvalidResultUrl { url }),
        }
    }
}
