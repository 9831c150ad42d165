//! Clipboard contents as an ordered list of typed items.

use bytes::Bytes;

/// One representation found on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    kind: String,
    data: Bytes,
}

impl ClipboardItem {
    /// Creates an item of mime `kind`.
    #[must_use]
    pub fn new(kind: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    /// MIME type of the item.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Raw bytes.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the item, returning its bytes.
    #[must_use]
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Whether the item carries an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind.starts_with("image/")
    }
}

/// Returns the first image item; everything after it is ignored.
#[must_use]
pub fn first_image(items: Vec<ClipboardItem>) -> Option<ClipboardItem> {
    items.into_iter().find(ClipboardItem::is_image)
}
