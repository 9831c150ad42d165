//! Direct download with a forced-attachment fallback.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::NotificationLevel;
use crate::domain::errors::DownloadError;
use crate::domain::ports::{DownloadReceipt, DownloadStrategy, NotificationPort};

/// Prefix every saved file carries.
pub const FILE_PREFIX: &str = "snapcut-";

const FORCED_ATTACHMENT_FLAG: &str = "fl_attachment";

/// Cloudinary delivery urls: `https://res.cloudinary.com/<cloud>/<kind>/upload/<rest>`.
static CLOUDINARY_UPLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https://res\.cloudinary\.com/[^/]+/(?:image|video|raw)/upload/)(.*)$")
        .expect("cloudinary pattern is valid")
});

/// Adds [`FILE_PREFIX`] unless the name already starts with it.
#[must_use]
pub fn normalize_file_name(name: &str) -> String {
    let name = name.trim();
    let name = if name.is_empty() { "image.png" } else { name };
    if name.starts_with(FILE_PREFIX) {
        name.to_string()
    } else {
        format!("{FILE_PREFIX}{name}")
    }
}

/// Rewrites `http://` to `https://`; other urls are returned unchanged.
#[must_use]
pub fn upgrade_to_https(url: &str) -> String {
    let url = url.trim();
    match url.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => format!("https://{}", &url[7..]),
        _ => url.to_string(),
    }
}

/// Returns the url that makes the host send the file as an attachment.
///
/// Cloudinary gets the `fl_attachment` flag inserted after `/upload/`; any
/// other host is returned unchanged.
#[must_use]
pub fn forced_download_url(url: &str) -> String {
    let Some(caps) = CLOUDINARY_UPLOAD.captures(url) else {
        return url.to_string();
    };
    let (prefix, rest) = (&caps[1], &caps[2]);
    if rest.starts_with(FORCED_ATTACHMENT_FLAG) {
        return url.to_string();
    }
    format!("{prefix}{FORCED_ATTACHMENT_FLAG}/{rest}")
}

/// Delivers result files, falling back when the direct path fails.
#[derive(Clone)]
pub struct DownloadResolver {
    direct: Arc<dyn DownloadStrategy>,
    fallback: Arc<dyn DownloadStrategy>,
    notifier: Arc<dyn NotificationPort>,
}

impl DownloadResolver {
    /// Creates a resolver trying `direct` before `fallback`.
    #[must_use]
    pub fn new(
        direct: Arc<dyn DownloadStrategy>,
        fallback: Arc<dyn DownloadStrategy>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            direct,
            fallback,
            notifier,
        }
    }

    /// Downloads `url` as `suggested_name`.
    ///
    /// # Errors
    /// Returns the fallback's error when both strategies fail.
    pub async fn download(
        &self,
        url: &str,
        suggested_name: &str,
    ) -> Result<DownloadReceipt, DownloadError> {
        let secure_url = upgrade_to_https(url);
        let file_name = normalize_file_name(suggested_name);

        self.notifier
            .send(NotificationLevel::Info, "Downloading", &file_name);
        debug!(
            url = %secure_url,
            file = %file_name,
            strategy = self.direct.name(),
            "Starting download"
        );

        match self.direct.deliver(&secure_url, &file_name).await {
            Ok(receipt) => {
                info!(?receipt, "Direct download finished");
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, strategy = self.direct.name(), "Direct download failed, falling back");
                let target = forced_download_url(&secure_url);
                let receipt = self.fallback.deliver(&target, &file_name).await?;
                info!(url = %target, strategy = self.fallback.name(), "Fallback download dispatched");
                self.notifier.send(
                    NotificationLevel::Info,
                    "Download opened in browser",
                    &file_name,
                );
                Ok(receipt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockDownloadStrategy, MockNotificationPort};
    use std::path::PathBuf;

    #[test]
    fn test_normalize_file_name() {
        assert_eq!(normalize_file_name("cat.png"), "snapcut-cat.png");
        assert_eq!(normalize_file_name("snapcut-cat.png"), "snapcut-cat.png");
        assert_eq!(normalize_file_name("  "), "snapcut-image.png");
    }

    #[test]
    fn test_upgrade_to_https() {
        assert_eq!(upgrade_to_https("http://host/a.png"), "https://host/a.png");
        assert_eq!(upgrade_to_https("HTTP://host/a.png"), "https://host/a.png");
        assert_eq!(upgrade_to_https("https://host/a.png"), "https://host/a.png");
        assert_eq!(upgrade_to_https("ftp://host/a.png"), "ftp://host/a.png");
    }

    #[test]
    fn test_forced_download_url_rewrites_cloudinary() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1712/cut/abc.png";
        assert_eq!(
            forced_download_url(url),
            "https://res.cloudinary.com/demo/image/upload/fl_attachment/v1712/cut/abc.png"
        );
    }

    #[test]
    fn test_forced_download_url_is_idempotent() {
        let url = "https://res.cloudinary.com/demo/image/upload/fl_attachment/v1/abc.png";
        assert_eq!(forced_download_url(url), url);
    }

    #[test]
    fn test_forced_download_url_leaves_other_hosts() {
        let url = "https://cdn.example.com/image/upload/abc.png";
        assert_eq!(forced_download_url(url), url);
    }

    #[tokio::test]
    async fn test_direct_success_skips_fallback() {
        let mut direct = MockDownloadStrategy::new();
        direct
            .expect_deliver()
            .withf(|url: &str, name: &str| {
                url == "https://host/result.png" && name == "snapcut-cat.png"
            })
            .times(1)
            .returning(|_, name| Ok(DownloadReceipt::Saved(PathBuf::from(name))));
        direct.expect_name().return_const("direct");

        let mut fallback = MockDownloadStrategy::new();
        fallback.expect_deliver().never();
        fallback.expect_name().return_const("browser");

        let notifier = Arc::new(MockNotificationPort::new());
        let resolver = DownloadResolver::new(Arc::new(direct), Arc::new(fallback), notifier.clone());

        let receipt = resolver
            .download("http://host/result.png", "cat.png")
            .await
            .unwrap();

        assert_eq!(receipt, DownloadReceipt::Saved(PathBuf::from("snapcut-cat.png")));
        assert_eq!(notifier.titles(), ["Downloading"]);
    }

    #[tokio::test]
    async fn test_network_error_takes_cloudinary_fallback() {
        let mut direct = MockDownloadStrategy::new();
        direct
            .expect_deliver()
            .times(1)
            .returning(|_, _| Err(DownloadError::network("connection reset")));
        direct.expect_name().return_const("direct");

        let mut fallback = MockDownloadStrategy::new();
        fallback
            .expect_deliver()
            .withf(|url: &str, name: &str| {
                url.contains("/upload/fl_attachment/") && name == "snapcut-cat.png"
            })
            .times(1)
            .returning(|url, _| {
                Ok(DownloadReceipt::Dispatched {
                    url: url.to_string(),
                })
            });
        fallback.expect_name().return_const("browser");

        let notifier = Arc::new(MockNotificationPort::new());
        let resolver = DownloadResolver::new(Arc::new(direct), Arc::new(fallback), notifier.clone());

        let receipt = resolver
            .download("http://res.cloudinary.com/demo/image/upload/v1/cat.png", "cat.png")
            .await
            .unwrap();

        assert_eq!(
            receipt,
            DownloadReceipt::Dispatched {
                url: "https://res.cloudinary.com/demo/image/upload/fl_attachment/v1/cat.png"
                    .to_string()
            }
        );
        assert_eq!(notifier.titles(), ["Downloading", "Download opened in browser"]);
    }

    #[tokio::test]
    async fn test_fallback_uses_upgraded_url_for_other_hosts() {
        let mut direct = MockDownloadStrategy::new();
        direct
            .expect_deliver()
            .returning(|_, _| Err(DownloadError::Status { status: 403 }));
        direct.expect_name().return_const("direct");

        let mut fallback = MockDownloadStrategy::new();
        fallback
            .expect_deliver()
            .withf(|url: &str, name: &str| {
                url == "https://host/result.png" && name == "snapcut-result.png"
            })
            .times(1)
            .returning(|url, _| {
                Ok(DownloadReceipt::Dispatched {
                    url: url.to_string(),
                })
            });
        fallback.expect_name().return_const("browser");

        let resolver = DownloadResolver::new(
            Arc::new(direct),
            Arc::new(fallback),
            Arc::new(MockNotificationPort::new()),
        );

        let receipt = resolver
            .download("http://host/result.png", "snapcut-result.png")
            .await;

        assert!(receipt.is_ok());
    }

    #[tokio::test]
    async fn test_fallback_failure_is_returned() {
        let mut direct = MockDownloadStrategy::new();
        direct
            .expect_deliver()
            .returning(|_, _| Err(DownloadError::network("offline")));
        direct.expect_name().return_const("direct");

        let mut fallback = MockDownloadStrategy::new();
        fallback.expect_deliver().returning(|_, _| {
            Err(DownloadError::Browser {
                message: "no browser".to_string(),
            })
        });
        fallback.expect_name().return_const("browser");

        let resolver = DownloadResolver::new(
            Arc::new(direct),
            Arc::new(fallback),
            Arc::new(MockNotificationPort::new()),
        );

        let err = resolver.download("https://host/a.png", "a.png").await.unwrap_err();

        assert!(matches!(err, DownloadError::Browser { .. }));
        assert_eq!(err.category(), "download-failed");
    }
}
