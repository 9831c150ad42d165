//! Ports implemented by infrastructure adapters.

mod clipboard_port;
mod download_port;
mod history_storage_port;
mod notification_port;
mod processing_port;

pub use clipboard_port::ClipboardPort;
pub use download_port::{DownloadReceipt, DownloadStrategy};
pub use history_storage_port::HistoryStoragePort;
pub use notification_port::NotificationPort;
pub use processing_port::ProcessingPort;
