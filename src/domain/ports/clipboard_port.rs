//! Clipboard port definition.

use crate::domain::entities::ClipboardItem;
use crate::domain::errors::ClipboardError;

/// Port for reading and writing the system clipboard.
///
/// Implementations may block; callers run them off the UI task.
pub trait ClipboardPort: Send + Sync {
    /// Reads the clipboard as an ordered list of items.
    fn read_items(&self) -> Vec<ClipboardItem>;

    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    /// Returns [`ClipboardError`] when the clipboard cannot be opened or written.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Clipboard with fixed contents.
    #[derive(Default)]
    pub struct MockClipboard {
        items: Vec<ClipboardItem>,
        pub written: Mutex<Vec<String>>,
        fail_writes: bool,
    }

    impl MockClipboard {
        pub fn with_items(items: Vec<ClipboardItem>) -> Self {
            Self {
                items,
                ..Self::default()
            }
        }

        /// Clipboard whose writes always fail.
        pub fn failing_writes() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }
    }

    impl ClipboardPort for MockClipboard {
        fn read_items(&self) -> Vec<ClipboardItem> {
            self.items.clone()
        }

        fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail_writes {
                return Err(ClipboardError::write("no clipboard owner"));
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}
