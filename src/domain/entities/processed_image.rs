//! Successful service answer.

/// Successful answer of the processing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    result_url: String,
}

impl ProcessedImage {
    /// Wraps the url returned by the service.
    #[must_use]
    pub fn new(result_url: impl Into<String>) -> Self {
        Self {
            result_url: result_url.into(),
        }
    }

    /// Location the cut-out can be retrieved from.
    #[must_use]
    pub fn result_url(&self) -> &str {
        &self.result_url
    }

    /// Consumes the image, returning its url.
    #[must_use]
    pub fn into_result_url(self) -> String {
        self.result_url
    }
}
