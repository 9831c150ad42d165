//! History persistence port definition.

use crate::domain::entities::HistoryEntry;
use crate::domain::errors::HistoryError;

/// Port for the durable slot holding the whole history list.
///
/// Writes always replace the full list.
pub trait HistoryStoragePort: Send + Sync {
    /// Loads the persisted list. A missing slot is an empty list.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Replaces the persisted list.
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError>;
}
