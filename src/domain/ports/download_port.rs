//! Download strategy port definition.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DownloadError;

/// How a download was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadReceipt {
    /// Bytes were fetched and written locally.
    Saved(PathBuf),
    /// The url was handed to an external agent that performs the transfer.
    Dispatched {
        /// Url that was handed off.
        url: String,
    },
}

/// One way of getting a remote file onto the local filesystem.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DownloadStrategy: Send + Sync {
    /// Delivers `url` under `file_name`.
    async fn deliver(&self, url: &str, file_name: &str) -> Result<DownloadReceipt, DownloadError>;

    /// Strategy name for logs.
    fn name(&self) -> &'static str;
}
