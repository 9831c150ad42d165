//! Picks an image out of the system clipboard.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{ClipboardItem, MediaType, UploadCandidate, first_image};
use crate::domain::errors::{ClipboardError, UploadError};
use crate::domain::ports::ClipboardPort;

/// Base name given to pasted images.
pub const PASTED_FILE_STEM: &str = "pasted-image";

/// Turns clipboard contents into upload candidates.
#[derive(Clone)]
pub struct ClipboardCapture {
    clipboard: Arc<dyn ClipboardPort>,
}

impl ClipboardCapture {
    /// Wraps a clipboard port.
    #[must_use]
    pub fn new(clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self { clipboard }
    }

    /// Reads the clipboard and stages its first image item.
    ///
    /// Returns `Ok(None)` when the clipboard holds no image.
    ///
    /// # Errors
    /// Returns the validation error for the selected item.
    pub async fn capture(&self) -> Result<Option<UploadCandidate>, UploadError> {
        let clipboard = self.clipboard.clone();
        let items = match tokio::task::spawn_blocking(move || clipboard.read_items()).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Clipboard read task failed");
                Vec::new()
            }
        };

        debug!(count = items.len(), "Clipboard items read");
        candidate_from_items(items)
    }

    /// Copies `text` to the clipboard.
    ///
    /// # Errors
    /// Returns [`ClipboardError`] when the write fails or its task dies.
    pub async fn copy_text(&self, text: String) -> Result<(), ClipboardError> {
        let clipboard = self.clipboard.clone();
        tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .map_err(|e| ClipboardError::write(e.to_string()))?
    }
}

/// Selects the first image item and validates it like any picked file.
///
/// # Errors
/// Returns the validation error for the selected item.
pub fn candidate_from_items(
    items: Vec<ClipboardItem>,
) -> Result<Option<UploadCandidate>, UploadError> {
    let Some(item) = first_image(items) else {
        return Ok(None);
    };

    let kind = item.kind().to_string();
    let extension = MediaType::from_mime(&kind).map_or("img", MediaType::extension);
    let name = format!("{PASTED_FILE_STEM}.{extension}");

    UploadCandidate::new(name, &kind, item.into_data()).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockClipboard;

    #[tokio::test]
    async fn test_capture_picks_first_image() {
        let clipboard = Arc::new(MockClipboard::with_items(vec![
            ClipboardItem::new("text/plain", "caption"),
            ClipboardItem::new("image/png", vec![1u8, 2, 3]),
            ClipboardItem::new("image/webp", vec![9u8]),
        ]));
        let capture = ClipboardCapture::new(clipboard);

        let candidate = capture.capture().await.unwrap().unwrap();

        assert_eq!(candidate.display_name(), "pasted-image.png");
        assert_eq!(candidate.media_type(), MediaType::Png);
        assert_eq!(candidate.payload().as_ref(), &[1u8, 2, 3]);
    }

    #[tokio::test]
    async fn test_capture_without_image_is_none() {
        let clipboard = Arc::new(MockClipboard::with_items(vec![ClipboardItem::new(
            "text/plain",
            "no image here",
        )]));
        let capture = ClipboardCapture::new(clipboard);

        assert!(capture.capture().await.unwrap().is_none());
    }

    #[test]
    fn test_pasted_gif_goes_through_validation() {
        let items = vec![ClipboardItem::new("image/gif", vec![0u8; 8])];
        let err = candidate_from_items(items).unwrap_err();
        assert_eq!(err.category(), "invalid-format");
    }

    #[test]
    fn test_pasted_oversize_image_rejected() {
        let items = vec![ClipboardItem::new(
            "image/png",
            vec![0u8; 10 * 1024 * 1024 + 1],
        )];
        let err = candidate_from_items(items).unwrap_err();
        assert_eq!(err.category(), "too-large");
    }

    #[test]
    fn test_paste_matches_picker_selection() {
        let bytes = vec![5u8; 256];
        let pasted = candidate_from_items(vec![ClipboardItem::new("image/png", bytes.clone())])
            .unwrap()
            .unwrap();
        let picked = UploadCandidate::new("pasted-image.png", "image/png", bytes).unwrap();

        assert_eq!(pasted, picked);
    }

    #[tokio::test]
    async fn test_copy_text_writes_clipboard() {
        let clipboard = Arc::new(MockClipboard::default());
        let capture = ClipboardCapture::new(clipboard.clone());

        capture
            .copy_text("https://host/result.png".to_string())
            .await
            .unwrap();

        assert_eq!(
            clipboard.written.lock().unwrap().as_slice(),
            ["https://host/result.png".to_string()]
        );
    }

    #[tokio::test]
    async fn test_copy_text_reports_write_failure() {
        let capture = ClipboardCapture::new(Arc::new(MockClipboard::failing_writes()));

        let err = capture
            .copy_text("https://host/result.png".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ClipboardError::Write { .. }));
        assert_eq!(err.category(), "clipboard-failed");
    }
}
