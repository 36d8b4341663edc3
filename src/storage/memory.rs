//! In-process storage backend.
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Storage, StorageScope};
use crate::error::StorageError;

/// A [`Storage`] kept entirely in memory.
///
/// Useful for hosts that own persistence themselves and for tests; a single
/// instance shared between two services behaves like a restart against the
/// same durable store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<(StorageScope, String), String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across both scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str, scope: StorageScope, default: &str) -> String {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&(scope, key.to_string()))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&self, key: &str, scope: StorageScope, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_default_when_absent() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k", StorageScope::Global, "dflt"), "dflt");
        assert!(storage.is_empty());
    }

    #[test]
    fn set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("k", StorageScope::Global, "1").unwrap();
        storage.set("k", StorageScope::Global, "2").unwrap();
        assert_eq!(storage.get("k", StorageScope::Global, ""), "2");
        assert_eq!(storage.len(), 1);
    }
}
