//! Fetches results over HTTP and saves them locally.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::domain::errors::DownloadError;
use crate::domain::ports::{DownloadReceipt, DownloadStrategy};

const USER_AGENT: &str = concat!("snapcut/", env!("CARGO_PKG_VERSION"));
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Downloads into a directory without overwriting existing files.
pub struct DirectSaveStrategy {
    client: Client,
    target_dir: PathBuf,
}

impl DirectSaveStrategy {
    /// Creates a strategy saving into `target_dir`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(target_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DownloadError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            target_dir: target_dir.into(),
        })
    }

    /// Directory files are saved to.
    #[must_use]
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, DownloadError> {
        let parsed = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::network("request timed out")
            } else {
                DownloadError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| DownloadError::network(e.to_string()))
    }
}

#[async_trait]
impl DownloadStrategy for DirectSaveStrategy {
    async fn deliver(&self, url: &str, file_name: &str) -> Result<DownloadReceipt, DownloadError> {
        let content = self.fetch(url).await?;
        debug!(url, bytes = content.len(), "Fetched result");

        let dir = self.target_dir.clone();
        let name = sanitize_file_name(file_name);
        let path = tokio::task::spawn_blocking(move || save_unique(&dir, &name, &content))
            .await
            .map_err(|e| DownloadError::io(e.to_string()))??;

        info!(path = %path.display(), "Result saved");
        Ok(DownloadReceipt::Saved(path))
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// Keeps only the final path component.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("image.png")
        .to_string()
}

/// Name for the `attempt`-th candidate: `cat.png`, `cat (1).png`, `cat (2).png`...
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem} ({attempt}).{ext}"),
        None => format!("{stem} ({attempt})"),
    }
}

fn save_unique(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf, DownloadError> {
    std::fs::create_dir_all(dir)?;
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(content)?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let target = dir.join(numbered_name(name, attempt));
        match temp_file.persist_noclobber(&target) {
            Ok(_) => return Ok(target),
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                temp_file = e.file;
            }
            Err(e) => return Err(e.error.into()),
        }
    }

    Err(DownloadError::io(format!(
        "no free file name for {name} in {}",
        dir.display()
    )))
}
