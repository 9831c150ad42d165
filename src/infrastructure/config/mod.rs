//! Application configuration.

pub mod app_config;
pub mod args;
pub mod storage;

pub use app_config::{AppConfig, DEFAULT_ENDPOINT, LogLevel, ThemeConfig, UiConfig};
pub use args::{CliArgs, Command, HistoryCommand};
pub use storage::{ConfigError, StorageManager};
