//! Application configuration.

use chrono::format::{Item, StrftimeItems};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "snapcut";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "snapcut";

/// Background removal webhook used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://snapcut.app.n8n.cloud/webhook/remove-background";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Background removal endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound for one processing or download request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where downloaded results are saved.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// Enable desktop notifications.
    #[serde(default = "default_true")]
    pub enable_desktop_notifications: bool,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Timestamp format for history entries (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Show only image files in the file explorer.
    #[serde(default = "default_true")]
    pub images_only: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            notification_duration: default_notification_duration(),
            images_only: true,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

fn default_accent_color() -> String {
    "Magenta".to_string()
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

/// Returns whether chrono can render timestamps with `format`.
#[must_use]
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

const fn default_true() -> bool {
    true
}

const fn default_notification_duration() -> u64 {
    5
}

impl AppConfig {
    /// Replaces values that would fail at render time with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !is_valid_timestamp_format(&self.ui.timestamp_format) {
            warn!(
                format = %self.ui.timestamp_format,
                "Invalid timestamp format, using default"
            );
            self.ui.timestamp_format = default_timestamp_format();
        }
        self
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(endpoint) = args.endpoint.as_ref().filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(download_dir) = &args.download_dir {
            self.download_dir = Some(download_dir.clone());
        }
        if let Some(notifications) = args.desktop_notifications {
            self.enable_desktop_notifications = notifications;
        }
        if let Some(accent_color) = &args.accent_color {
            self.theme.accent_color = accent_color.clone();
        }
    }

    /// Processing and download timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// How long a notification stays on screen.
    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.ui.notification_duration)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default data directory, home of the history file and logs.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::default_data_dir().map(|dir| dir.join("snapcut.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the directory downloads are saved to: the configured one,
    /// then the user's download folder, then the working directory.
    #[must_use]
    pub fn effective_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|dirs| dirs.download_dir().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            download_dir: None,
            enable_desktop_notifications: true,
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r##"
            endpoint = "https://example.test/hook"
            timeout_secs = 30

            [ui]
            notification_duration = 8

            [theme]
            accent_color = "#ff8800"
        "##;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.endpoint, "https://example.test/hook");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.notification_duration(), Duration::from_secs(8));
        assert_eq!(config.theme.accent_color, "#ff8800");
        assert!(config.ui.images_only);
        assert!(config.enable_desktop_notifications);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn test_merge_with_args() {
        let args = CliArgs::parse_from([
            "snapcut",
            "--endpoint",
            "http://localhost:5678/hook",
            "--timeout",
            "15",
            "--download-dir",
            "/tmp/out",
            "--desktop-notifications",
            "false",
            "--log-level",
            "debug",
        ]);
        let mut config = AppConfig::default();

        config.merge_with_args(&args);

        assert_eq!(config.endpoint, "http://localhost:5678/hook");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.effective_download_dir(), PathBuf::from("/tmp/out"));
        assert!(!config.enable_desktop_notifications);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_blank_endpoint_arg_ignored() {
        let args = CliArgs::parse_from(["snapcut", "--endpoint", "  "]);
        let mut config = AppConfig::default();

        config.merge_with_args(&args);

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let config: AppConfig = toml::from_str(
            r#"
            [ui]
            timestamp_format = "%Q %H:%M"
        "#,
        )
        .unwrap();

        let config = config.sanitized();

        assert_eq!(config.ui.timestamp_format, default_timestamp_format());
    }

    #[test]
    fn test_valid_timestamp_format_kept() {
        let mut config = AppConfig::default();
        config.ui.timestamp_format = "%d/%m %H:%M:%S".to_string();

        let config = config.sanitized();

        assert_eq!(config.ui.timestamp_format, "%d/%m %H:%M:%S");
        assert!(is_valid_timestamp_format("%Y-%m-%d"));
        assert!(!is_valid_timestamp_format("%Q"));
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = AppConfig {
            timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
