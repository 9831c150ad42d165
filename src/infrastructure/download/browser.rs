//! Hands downloads to the system browser.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::DownloadError;
use crate::domain::ports::{DownloadReceipt, DownloadStrategy};

/// Opens the url in the default browser, which performs the transfer.
#[derive(Debug, Clone, Default)]
pub struct BrowserDownloadStrategy;

impl BrowserDownloadStrategy {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DownloadStrategy for BrowserDownloadStrategy {
    async fn deliver(&self, url: &str, file_name: &str) -> Result<DownloadReceipt, DownloadError> {
        debug!(url, file_name, "Opening url in browser");
        let target = url.to_string();
        tokio::task::spawn_blocking(move || opener::open_browser(&target))
            .await
            .map_err(|e| DownloadError::Browser {
                message: e.to_string(),
            })?
            .map_err(|e| DownloadError::Browser {
                message: e.to_string(),
            })?;

        Ok(DownloadReceipt::Dispatched {
            url: url.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
