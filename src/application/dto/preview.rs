//! Preview DTOs.

/// Displayable form of a staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// `data:` URL embedding the payload.
    pub data_url: String,
    /// Pixel width and height read from the image header.
    pub dimensions: (u32, u32),
}

impl Preview {
    /// Creates a preview.
    #[must_use]
    pub const fn new(data_url: String, dimensions: (u32, u32)) -> Self {
        Self {
            data_url,
            dimensions,
        }
    }

    /// Data URL shortened for single-line display.
    #[must_use]
    pub fn abbreviated_data_url(&self, max_chars: usize) -> String {
        if self.data_url.chars().count() <= max_chars {
            return self.data_url.clone();
        }
        let head: String = self.data_url.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Preview state of the staged file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// Nothing staged.
    #[default]
    Empty,
    /// Conversion running.
    Rendering,
    /// Conversion finished.
    Ready(Preview),
    /// Conversion failed; the file can still be processed.
    Unavailable,
}
