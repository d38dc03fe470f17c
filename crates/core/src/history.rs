//! History entries — immutable records of finished generations.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::studio::{InputSnapshot, Mode};

/// A single past generation.
///
/// Created once, after a successful generation, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique ID for this entry
    pub id: String,

    /// The mode that produced the content
    pub mode: Mode,

    /// Generated text, as returned by the provider
    pub content: String,

    /// Result title at generation time
    pub title: String,

    /// Creation instant, milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Copy of the inputs the content was generated from
    pub data: InputSnapshot,
}

impl HistoryEntry {
    /// Record a generation that just finished.
    ///
    /// `data` is cloned, so later edits to the live inputs never reach the entry.
    pub fn record(
        mode: Mode,
        title: impl Into<String>,
        content: impl Into<String>,
        data: &InputSnapshot,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mode,
            content: content.into(),
            title: title.into(),
            timestamp: Utc::now().timestamp_millis(),
            data: data.clone(),
        }
    }
}
