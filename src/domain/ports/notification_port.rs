//! Notification port definition.

use crate::domain::NotificationLevel;

/// Port for user-visible status messages.
pub trait NotificationPort: Send + Sync {
    /// Shows a notification.
    fn send(&self, level: NotificationLevel, title: &str, body: &str);
}

#[cfg(test)]
#[allow(dead_code)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    pub struct MockNotificationPort {
        pub notifications: Arc<Mutex<Vec<(NotificationLevel, String, String)>>>,
    }

    impl MockNotificationPort {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn titles(&self) -> Vec<String> {
            self.notifications
                .lock()
                .unwrap()
                .iter()
                .map(|(_, title, _)| title.clone())
                .collect()
        }
    }

    impl NotificationPort for MockNotificationPort {
        fn send(&self, level: NotificationLevel, title: &str, body: &str) {
            self.notifications
                .lock()
                .unwrap()
                .push((level, title.to_string(), body.to_string()));
        }
    }
}
