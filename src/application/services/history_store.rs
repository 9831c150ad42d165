//! Ordered history of completed removals.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{EntryId, HistoryEntry};
use crate::domain::errors::HistoryError;
use crate::domain::ports::HistoryStoragePort;

/// Newest-first list of results, mirrored to durable storage.
///
/// Every mutation rewrites the whole list. The in-memory change is kept even
/// when the write fails; the error is returned so the caller can surface it.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Arc<dyn HistoryStoragePort>,
}

impl HistoryStore {
    /// Creates an empty store without reading storage.
    #[must_use]
    pub fn new(storage: Arc<dyn HistoryStoragePort>) -> Self {
        Self {
            entries: Vec::new(),
            storage,
        }
    }

    /// Reads the persisted list once.
    ///
    /// Unreadable storage starts an empty history; the failure is logged.
    #[must_use]
    pub fn load(storage: Arc<dyn HistoryStoragePort>) -> Self {
        let entries = match storage.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Failed to load history, starting empty");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "History loaded");

        Self { entries, storage }
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: &EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Adds `entry` in front of the list.
    ///
    /// # Errors
    /// Returns error if the list could not be persisted.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        debug!(id = %entry.id(), name = entry.original_name(), "Appending history entry");
        self.entries.insert(0, entry);
        self.persist()
    }

    /// Removes the entry with `id`; unknown ids are ignored.
    ///
    /// Returns the removed entry.
    ///
    /// # Errors
    /// Returns error if the list could not be persisted.
    pub fn remove(&mut self, id: &EntryId) -> Result<Option<HistoryEntry>, HistoryError> {
        let Some(index) = self.entries.iter().position(|e| e.id() == id) else {
            debug!(id = %id, "History entry not found");
            return Ok(None);
        };
        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Removes every entry.
    ///
    /// # Errors
    /// Returns error if the list could not be persisted.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        if self.entries.is_empty() {
            return Ok(());
        }
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), HistoryError> {
        self.storage.save(&self.entries).inspect_err(|e| {
            warn!(error = %e, count = self.entries.len(), "Failed to persist history");
        })
    }
}
