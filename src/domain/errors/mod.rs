//! Domain error types.

mod clipboard_error;
mod download_error;
mod history_error;
mod upload_error;

pub use clipboard_error::ClipboardError;
pub use download_error::DownloadError;
pub use history_error::HistoryError;
pub use upload_error::{ProcessingFailure, UploadError};
