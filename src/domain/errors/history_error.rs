//! History persistence error types.

use thiserror::Error;

/// History storage error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum HistoryError {
    #[error("history storage is unavailable")]
    Unavailable,

    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
