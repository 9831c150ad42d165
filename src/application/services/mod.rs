//! Application services shared by the TUI and the CLI.

pub mod clipboard_capture;
pub mod download_resolver;
pub mod history_store;
pub mod notification_manager;
pub mod preview_renderer;
pub mod upload_session;

pub use clipboard_capture::ClipboardCapture;
pub use download_resolver::DownloadResolver;
pub use history_store::HistoryStore;
pub use notification_manager::NotificationManager;
pub use preview_renderer::{PreviewError, render_preview};
pub use upload_session::{ProcessingState, UploadSession};
