//! JSON file holding the processing history.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::entities::HistoryEntry;
use crate::domain::errors::HistoryError;
use crate::domain::ports::HistoryStoragePort;
use crate::infrastructure::config::storage::write_atomic;

/// History persisted as one JSON array.
pub struct JsonHistoryStorage {
    path: PathBuf,
}

impl JsonHistoryStorage {
    /// Storage backed by the JSON file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStoragePort for JsonHistoryStorage {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
            Ok(entries) => {
                debug!(count = entries.len(), "History loaded");
                Ok(entries)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed history file, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_vec_pretty(entries)?;
        write_atomic(&self.path, &content)?;
        debug!(count = entries.len(), path = %self.path.display(), "History saved");
        Ok(())
    }
}
