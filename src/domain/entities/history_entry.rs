//! Persisted record of a completed removal.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::upload_candidate::result_name_for;

/// Opaque, time-derived identifier of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generates an id for an entry created at `created_at_ms`.
    ///
    /// The millisecond timestamp leads so ids sort by creation time; the random
    /// suffix keeps ids created within the same millisecond apart.
    #[must_use]
    pub fn generate(created_at_ms: i64) -> Self {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{created_at_ms:x}-{}", &nonce[..8]))
    }

    /// Id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed background removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: EntryId,
    original_name: String,
    result_url: String,
    created_at: i64,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(original_name: impl Into<String>, result_url: impl Into<String>) -> Self {
        Self::at(original_name, result_url, Utc::now().timestamp_millis())
    }

    /// Creates an entry with an explicit epoch-millisecond timestamp.
    #[must_use]
    pub fn at(
        original_name: impl Into<String>,
        result_url: impl Into<String>,
        created_at_ms: i64,
    ) -> Self {
        Self {
            id: EntryId::generate(created_at_ms),
            original_name: original_name.into(),
            result_url: result_url.into(),
            created_at: created_at_ms,
        }
    }

    /// Unique id.
    #[must_use]
    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    /// Name of the uploaded file.
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Where the cut-out is hosted.
    #[must_use]
    pub fn result_url(&self) -> &str {
        &self.result_url
    }

    /// Creation time in epoch milliseconds.
    #[must_use]
    pub const fn created_at_ms(&self) -> i64 {
        self.created_at
    }

    /// Creation time in the local timezone, if the stored value is in range.
    #[must_use]
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.created_at).single()
    }

    /// File name suggested when downloading this result.
    #[must_use]
    pub fn suggested_file_name(&self) -> String {
        result_name_for(&self.original_name)
    }
}
