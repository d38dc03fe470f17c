//! In-memory store — useful for testing and ephemeral sessions.

use hookstudio_core::error::StorageError;
use hookstudio_core::storage::KvStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// A key-value store kept in a HashMap.
/// Useful for testing and sessions where persistence isn't needed.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(key: &str) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        reason: "store lock poisoned".into(),
    }
}

impl KvStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned(key))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let store = InMemoryStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", b"value").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"value"[..]));
        assert_eq!(store.len(), 1);

        store.set("k", b"other").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"other"[..]));

        store.delete("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_missing_key_is_ok() {
        let store = InMemoryStore::new();
        assert!(store.delete("nothing").is_ok());
    }
}
