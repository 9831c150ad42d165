//! Domain layer with core business entities and port definitions.

/// Plans, features and routes of the product site.
pub mod catalog;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Notification definitions.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Upload validation rules.
pub mod validation;

pub use entities::{HistoryEntry, MediaType, UploadCandidate};
pub use errors::{ClipboardError, DownloadError, HistoryError, ProcessingFailure, UploadError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{ClipboardPort, DownloadStrategy, HistoryStoragePort, NotificationPort, ProcessingPort};
