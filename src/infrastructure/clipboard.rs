//! System clipboard adapter.

use std::io::Cursor;

use arboard::{Clipboard, ImageData};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, error, warn};

use crate::domain::entities::{ClipboardItem, MediaType};
use crate::domain::errors::ClipboardError;
use crate::domain::ports::ClipboardPort;

/// System clipboard backed by `arboard`.
///
/// Each call opens a fresh handle; calls block and belong on the blocking pool.
#[derive(Clone, Default)]
pub struct ArboardClipboard {}

impl ArboardClipboard {
    /// Creates the adapter.
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl ClipboardPort for ArboardClipboard {
    fn read_items(&self) -> Vec<ClipboardItem> {
        let mut cb = match Clipboard::new() {
            Ok(cb) => cb,
            Err(e) => {
                warn!("Failed to initialize clipboard for read: {}", e);
                return Vec::new();
            }
        };

        let mut items = Vec::new();
        if let Ok(text) = cb.get_text() {
            if !text.is_empty() {
                items.push(ClipboardItem::new("text/plain", text));
            }
        }
        match cb.get_image() {
            Ok(image) => match encode_png(image) {
                Some(png) => items.push(ClipboardItem::new(MediaType::Png.mime(), png)),
                None => warn!("Clipboard image could not be encoded"),
            },
            Err(e) => debug!("No clipboard image: {}", e),
        }
        items
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut cb = Clipboard::new().map_err(|e| {
            warn!("Failed to initialize clipboard for copy: {}", e);
            ClipboardError::unavailable(e.to_string())
        })?;
        cb.set_text(text).map_err(|e| {
            error!("Failed to set clipboard text: {}", e);
            ClipboardError::write(e.to_string())
        })
    }
}

/// Encodes raw RGBA clipboard pixels as PNG.
fn encode_png(image: ImageData<'_>) -> Option<Vec<u8>> {
    let width = u32::try_from(image.width).ok()?;
    let height = u32::try_from(image.height).ok()?;
    let buffer = RgbaImage::from_raw(width, height, image.bytes.into_owned())?;

    let mut out = Cursor::new(Vec::new());
    buffer
        .write_to(&mut out, ImageFormat::Png)
        .inspect_err(|e| warn!("PNG encoding failed: {}", e))
        .ok()?;
    Some(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_encode_png() {
        let image = ImageData {
            width: 2,
            height: 1,
            bytes: Cow::Owned(vec![255, 0, 0, 255, 0, 255, 0, 255]),
        };

        let png = encode_png(image).unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let image = ImageData {
            width: 4,
            height: 4,
            bytes: Cow::Owned(vec![0; 3]),
        };

        assert!(encode_png(image).is_none());
    }
}
