//! File staged for background removal.

use std::fmt;
use std::path::Path;

use bytes::Bytes;

use super::MediaType;
use crate::domain::errors::UploadError;
use crate::domain::validation;

/// Extension of the cut-outs returned by the service.
const RESULT_EXTENSION: &str = "png";

/// A validated file waiting to be processed.
///
/// Only constructed through [`UploadCandidate::new`], which runs the same
/// validation for every source (file picker, drop, clipboard).
#[derive(Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    display_name: String,
    declared_type: String,
    media_type: MediaType,
    payload: Bytes,
}

impl UploadCandidate {
    /// Validates and stages a file.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidFormat`] or [`UploadError::TooLarge`].
    pub fn new(
        display_name: impl Into<String>,
        declared_type: &str,
        payload: impl Into<Bytes>,
    ) -> Result<Self, UploadError> {
        let payload = payload.into();
        let media_type = validation::validate(declared_type, payload.len() as u64)?;

        Ok(Self {
            display_name: display_name.into(),
            declared_type: declared_type.trim().to_string(),
            media_type,
            payload,
        })
    }

    /// Name shown to the user, usually the original file name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Media type as the source declared it, spelling preserved.
    #[must_use]
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Allow-listed format the declared type resolved to.
    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Raw file bytes.
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Byte size of the payload.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Human readable size with one decimal, in MB.
    #[must_use]
    pub fn size_label(&self) -> String {
        format_megabytes(self.size())
    }

    /// File name suggested when saving the processed result.
    #[must_use]
    pub fn suggested_result_name(&self) -> String {
        result_name_for(&self.display_name)
    }
}

impl fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("display_name", &self.display_name)
            .field("declared_type", &self.declared_type)
            .field("media_type", &self.media_type)
            .field("size", &self.payload.len())
            .finish()
    }
}

/// Formats a byte count as megabytes with one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Maps an original file name to the name of its cut-out.
#[must_use]
pub fn result_name_for(original: &str) -> String {
    let stem = Path::new(original)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{stem}.{RESULT_EXTENSION}")
}
