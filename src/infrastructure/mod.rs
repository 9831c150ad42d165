//! Infrastructure layer with external service adapters.

pub mod clipboard;
/// Application configuration.
pub mod config;
/// Download strategies.
pub mod download;
/// System notifications.
pub mod notifications;
/// Background removal webhook client.
pub mod processing;
/// History persistence.
pub mod storage;

pub use clipboard::ArboardClipboard;
pub use config::{AppConfig, CliArgs, Command, HistoryCommand, LogLevel, StorageManager};
pub use download::{BrowserDownloadStrategy, DirectSaveStrategy};
pub use notifications::DesktopNotificationService;
pub use processing::WebhookProcessingClient;
pub use storage::JsonHistoryStorage;
