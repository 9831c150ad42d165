//! Staging of files picked, dropped or pasted by the user.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::application::services::ClipboardCapture;
use crate::domain::entities::{MediaType, UploadCandidate};
use crate::domain::errors::UploadError;
use crate::domain::validation;

/// Validates and loads a user selection into an [`UploadCandidate`].
pub struct StageUploadUseCase {
    clipboard: ClipboardCapture,
}

impl StageUploadUseCase {
    /// Creates the use case.
    #[must_use]
    pub const fn new(clipboard: ClipboardCapture) -> Self {
        Self { clipboard }
    }

    /// Stages the file at `path`.
    ///
    /// Format and size are checked from the file name and metadata before
    /// the content is read, so oversize files are never loaded.
    ///
    /// # Errors
    /// Returns a validation error or [`UploadError::Unreadable`].
    pub async fn from_path(&self, path: &Path) -> Result<UploadCandidate, UploadError> {
        let shown = path.display().to_string();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| UploadError::unreadable(&shown, e.to_string()))?;
        if !metadata.is_file() {
            return Err(UploadError::unreadable(&shown, "not a regular file"));
        }

        let declared = MediaType::declared_for_path(path);
        validation::validate(declared, metadata.len())?;

        let payload = tokio::fs::read(path)
            .await
            .map_err(|e| UploadError::unreadable(&shown, e.to_string()))?;
        let name = path
            .file_name()
            .map_or_else(|| shown.clone(), |n| n.to_string_lossy().into_owned());

        let candidate = UploadCandidate::new(name, declared, payload)?;
        info!(path = %shown, size = candidate.size(), "File staged from disk");
        Ok(candidate)
    }

    /// Stages a path dropped onto the terminal.
    ///
    /// # Errors
    /// Returns [`UploadError::Unreadable`] when the text is not a path, or the
    /// errors of [`Self::from_path`].
    pub async fn from_dropped_text(&self, text: &str) -> Result<UploadCandidate, UploadError> {
        let path = parse_dropped_path(text)
            .ok_or_else(|| UploadError::unreadable(text.trim(), "pasted text is not a file path"))?;
        debug!(path = %path.display(), "Dropped path parsed");
        self.from_path(&path).await
    }

    /// Stages the first image on the clipboard, if any.
    ///
    /// # Errors
    /// Returns the validation error for the clipboard image.
    pub async fn from_clipboard(&self) -> Result<Option<UploadCandidate>, UploadError> {
        self.clipboard.capture().await
    }
}

/// Extracts a file path from text a terminal produces when a file is dropped.
///
/// Handles quoting, backslash-escaped spaces and `file://` URLs.
#[must_use]
pub fn parse_dropped_path(text: &str) -> Option<PathBuf> {
    let text = text.trim();
    if text.is_empty() || text.contains('\n') {
        return None;
    }

    let unquoted = match text.as_bytes() {
        [b'\'', .., b'\''] | [b'"', .., b'"'] => &text[1..text.len() - 1],
        _ => text,
    };

    let path = if let Some(rest) = unquoted.strip_prefix("file://") {
        percent_decode(rest.strip_prefix("localhost").unwrap_or(rest))?
    } else {
        unescape_spaces(unquoted)
    };

    (!path.is_empty()).then(|| PathBuf::from(path))
}

fn unescape_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, ' ' | '(' | ')' | '\'' | '&' | '\\') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

fn percent_decode(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = text.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
