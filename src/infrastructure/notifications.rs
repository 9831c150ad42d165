//! Desktop notifications for finished uploads and downloads.
//!
//! Only outcomes reach the desktop; progress chatter stays in the terminal.
//! Without the `notify` feature the service filters as usual and drops
//! everything at the last step.

use crate::domain::notification::NotificationLevel;
use crate::domain::ports::NotificationPort;

/// Sends outcome notifications to the desktop environment.
#[derive(Debug, Clone, Copy)]
pub struct DesktopNotificationService {
    enabled: bool,
    min_level: NotificationLevel,
}

impl Default for DesktopNotificationService {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DesktopNotificationService {
    /// Creates the service; `enabled` false silences it.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            min_level: NotificationLevel::Success,
        }
    }

    /// Lowest level that reaches the desktop.
    #[must_use]
    pub const fn with_min_level(mut self, level: NotificationLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Whether a message of `level` would be shown.
    #[must_use]
    pub fn accepts(&self, level: NotificationLevel) -> bool {
        self.enabled && level >= self.min_level
    }
}

impl NotificationPort for DesktopNotificationService {
    fn send(&self, level: NotificationLevel, title: &str, body: &str) {
        if !self.accepts(level) {
            tracing::trace!(?level, title, "Desktop notification filtered");
            return;
        }
        show(level, title.to_string(), body.to_string());
    }
}

#[cfg(feature = "notify")]
fn show(level: NotificationLevel, title: String, body: String) {
    use notify_rust::{Notification, Timeout};

    let millis = u32::try_from(level.desktop_timeout().as_millis()).unwrap_or(u32::MAX);
    tokio::task::spawn_blocking(move || {
        if let Err(e) = Notification::new()
            .summary(&title)
            .body(&body)
            .appname(crate::NAME)
            .timeout(Timeout::Milliseconds(millis))
            .show()
        {
            tracing::warn!(error = %e, "Failed to show desktop notification");
        }
    });
}

#[cfg(not(feature = "notify"))]
fn show(_level: NotificationLevel, _title: String, _body: String) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_outcomes_pass_by_default() {
        let service = DesktopNotificationService::new(true);

        assert!(!service.accepts(NotificationLevel::Info));
        assert!(service.accepts(NotificationLevel::Success));
        assert!(service.accepts(NotificationLevel::Error));
    }

    #[test]
    fn test_disabled_service_accepts_nothing() {
        let service = DesktopNotificationService::new(false);

        assert!(!service.accepts(NotificationLevel::Error));
    }

    #[test]
    fn test_min_level_raises_threshold() {
        let service =
            DesktopNotificationService::new(true).with_min_level(NotificationLevel::Warn);

        assert!(!service.accepts(NotificationLevel::Success));
        assert!(service.accepts(NotificationLevel::Warn));
    }
}
