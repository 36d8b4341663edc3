//! Session-wide set of file-type recommendations, mirrored to storage.
use std::collections::HashSet;

use crate::error::StorageError;
use crate::storage::{self, RECOMMENDATIONS_KEY, Storage, StorageScope};

/// Ids recommended so far. Grows only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationSet {
    ids: HashSet<String>,
}

impl RecommendationSet {
    /// Load the persisted set; absent or unparseable state is empty.
    #[must_use]
    pub fn hydrate(storage: &dyn Storage) -> Self {
        Self {
            ids: storage::read_string_list(storage, RECOMMENDATIONS_KEY, StorageScope::Global)
                .into_iter()
                .collect(),
        }
    }

    /// Insert `ids`; returns whether anything new was added.
    pub fn insert_all<I>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.ids.len();
        self.ids.extend(ids);
        self.ids.len() != before
    }

    /// Whether `id` has been recommended.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of recommended ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been recommended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in sorted order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Write the whole set to global storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn persist(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage::write_string_list(
            storage,
            RECOMMENDATIONS_KEY,
            StorageScope::Global,
            &self.to_sorted_vec(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn hydrate_from_persisted_array() {
        let storage = MemoryStorage::new();
        storage
            .set(RECOMMENDATIONS_KEY, StorageScope::Global, r#"["b.b","a.a"]"#)
            .unwrap();
        let set = RecommendationSet::hydrate(&storage);
        assert_eq!(set.to_sorted_vec(), ["a.a", "b.b"]);
    }

    #[test]
    fn hydrate_invalid_json_is_empty() {
        let storage = MemoryStorage::new();
        storage
            .set(RECOMMENDATIONS_KEY, StorageScope::Global, "[\"unterminated")
            .unwrap();
        assert!(RecommendationSet::hydrate(&storage).is_empty());
    }

    #[test]
    fn insert_all_reports_growth_only() {
        let mut set = RecommendationSet::default();
        assert!(set.insert_all(["a.a".to_string(), "b.b".to_string()]));
        assert!(!set.insert_all(["a.a".to_string()]));
        assert!(!set.insert_all(Vec::new()));
        assert_eq!(set.len(), 2);
        assert!(set.contains("b.b"));
    }

    #[test]
    fn persist_then_hydrate_is_superset_of_loaded() {
        let storage = MemoryStorage::new();
        storage
            .set(RECOMMENDATIONS_KEY, StorageScope::Global, r#"["old.one"]"#)
            .unwrap();
        let mut set = RecommendationSet::hydrate(&storage);
        set.insert_all(["new.one".to_string()]);
        set.persist(&storage).unwrap();

        let reloaded = RecommendationSet::hydrate(&storage);
        assert!(reloaded.contains("old.one"));
        assert!(reloaded.contains("new.one"));
    }
}
