//! The history store — a capped, newest-first log of generations.
//!
//! The whole collection is serialized as one JSON array under a single key.
//! Persistence is best-effort: no operation here ever returns an error.
//! Read failures behave as an empty history, write failures leave the
//! previous collection in place, and both are logged.

use hookstudio_core::error::StorageError;
use hookstudio_core::history::HistoryEntry;
use hookstudio_core::storage::KvStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of entries kept unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50;

/// Key the collection lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "tiktok_studio_history_v1";

/// Capped generation history over a [`KvStore`].
pub struct HistoryStore {
    store: Arc<dyn KvStore>,
    key: String,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.into(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the capacity. Zero is treated as one.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// All entries, newest first. Empty when nothing readable is stored.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(backend = self.store.name(), error = %e, "Error loading history");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let Some(bytes) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
            key: self.key.clone(),
            reason: e.to_string(),
        })
    }

    /// Prepend `entry`, keep the newest `capacity` entries, persist, and
    /// return the resulting collection.
    ///
    /// If the write fails the stored collection is unchanged and a fresh
    /// `load()` is returned instead.
    pub fn append(&self, entry: HistoryEntry) -> Vec<HistoryEntry> {
        let current = self.load();
        let mut updated = Vec::with_capacity(self.capacity);
        updated.push(entry);
        updated.extend(current);
        updated.truncate(self.capacity);

        match self.persist(&updated) {
            Ok(()) => {
                debug!(count = updated.len(), "History entry saved");
                updated
            }
            Err(e) => {
                warn!(backend = self.store.name(), error = %e, "Error saving history");
                self.load()
            }
        }
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(entries).map_err(|e| StorageError::Serialization {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&self.key, &bytes)
    }

    /// Remove the stored collection entirely.
    pub fn clear(&self) {
        if let Err(e) = self.store.delete(&self.key) {
            warn!(backend = self.store.name(), error = %e, "Error clearing history");
        }
    }
}
