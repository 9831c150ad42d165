//! Bracketed paste scoped to the upload view.

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use tracing::{debug, warn};

/// Keeps bracketed paste enabled while alive.
///
/// Dropped file paths and pasted text arrive as a single `Event::Paste`
/// instead of a stream of key presses. The mode is switched off again on
/// drop, including when the event loop exits with an error.
pub struct PasteGuard {
    _private: (),
}

impl PasteGuard {
    /// # Errors
    /// Returns error if the terminal rejects the escape sequence.
    pub fn enable() -> std::io::Result<Self> {
        crossterm::execute!(std::io::stdout(), EnableBracketedPaste)?;
        debug!("Bracketed paste enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for PasteGuard {
    fn drop(&mut self) {
        if let Err(e) = crossterm::execute!(std::io::stdout(), DisableBracketedPaste) {
            warn!(error = %e, "Failed to disable bracketed paste");
        } else {
            debug!("Bracketed paste disabled");
        }
    }
}
