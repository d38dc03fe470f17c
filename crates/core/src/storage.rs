//! Storage trait — the key-value persistence boundary.
//!
//! The history lives as one serialized blob under one well-known key, so the
//! store only needs whole-value get, set and delete. Operations are
//! synchronous: they are local and short next to a generation call.

use crate::error::StorageError;

/// An ordered key-value byte store.
///
/// Implementations: in-memory (for testing), file-backed directory.
pub trait KvStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Read the value under `key`. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &[u8]) -> std::result::Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> std::result::Result<(), StorageError>;
}
