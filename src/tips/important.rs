//! Gate for important recommendations: ignore list, installed check, match.
use std::collections::HashSet;

use super::index::ImportantTip;
use crate::error::{MatchError, StorageError};
use crate::extensions::is_installed;
use crate::matcher::PathMatcher;
use crate::storage::{self, IMPORTANT_IGNORE_KEY, Storage, StorageScope};

/// Important recommendations the user never wants to see again.
///
/// Append-only; every append is written to global storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportantIgnoreList {
    ids: Vec<String>,
}

impl ImportantIgnoreList {
    /// Load the persisted list; absent or unparseable state is empty.
    #[must_use]
    pub fn hydrate(storage: &dyn Storage) -> Self {
        Self {
            ids: storage::read_string_list(storage, IMPORTANT_IGNORE_KEY, StorageScope::Global),
        }
    }

    /// Whether `id` is suppressed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Ignored ids in the order they were dismissed.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Suppress `id` and persist the list.
    ///
    /// The in-memory list is updated even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn ignore(&mut self, id: &str, storage: &dyn Storage) -> Result<(), StorageError> {
        if !self.contains(id) {
            self.ids.push(id.to_string());
        }
        storage::write_string_list(storage, IMPORTANT_IGNORE_KEY, StorageScope::Global, &self.ids)
    }
}

/// Important tips that should be notified for `path`, in tip order.
///
/// A tip is skipped when ignored, when already installed, or when its
/// pattern does not match, checked in that order.
///
/// # Errors
///
/// Propagates the first matcher fault.
pub fn pending_important(
    tips: &[ImportantTip],
    ignored: &ImportantIgnoreList,
    installed: &HashSet<String>,
    path: &str,
    matcher: &dyn PathMatcher,
) -> Result<Vec<String>, MatchError> {
    let mut pending = Vec::new();
    for tip in tips {
        if ignored.contains(&tip.extension_id) {
            tracing::debug!("{} is on the ignore list", tip.extension_id);
            continue;
        }
        if is_installed(installed, &tip.extension_id) {
            tracing::debug!("{} is already installed", tip.extension_id);
            continue;
        }
        if !matcher.is_match(&tip.pattern, path)? {
            continue;
        }
        pending.push(tip.extension_id.clone());
    }
    Ok(pending)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::extensions::{InstalledExtension, installed_keys};
    use crate::matcher::GlobPathMatcher;
    use crate::storage::MemoryStorage;

    fn tip(id: &str, pattern: &str) -> ImportantTip {
        ImportantTip {
            extension_id: id.to_string(),
            pattern: pattern.to_string(),
        }
    }

    #[test]
    fn matching_tip_is_pending() {
        let pending = pending_important(
            &[tip("foo.bar", "**/*.ts")],
            &ImportantIgnoreList::default(),
            &HashSet::new(),
            "a.ts",
            &GlobPathMatcher::new(),
        )
        .unwrap();
        assert_eq!(pending, ["foo.bar"]);
    }

    #[test]
    fn ignored_tip_is_skipped() {
        let storage = MemoryStorage::new();
        let mut ignored = ImportantIgnoreList::default();
        ignored.ignore("foo.bar", &storage).unwrap();
        let pending = pending_important(
            &[tip("foo.bar", "**/*.ts")],
            &ignored,
            &HashSet::new(),
            "a.ts",
            &GlobPathMatcher::new(),
        )
        .unwrap();
        assert!(pending.is_empty());
    }

    #[test]
    fn installed_tip_is_skipped() {
        let installed = installed_keys(&[InstalledExtension::new("foo", "bar")]);
        let pending = pending_important(
            &[tip("foo.bar", "**/*.ts"), tip("baz.qux", "**/*.ts")],
            &ImportantIgnoreList::default(),
            &installed,
            "a.ts",
            &GlobPathMatcher::new(),
        )
        .unwrap();
        assert_eq!(pending, ["baz.qux"]);
    }

    #[test]
    fn several_tips_fire_independently() {
        let pending = pending_important(
            &[
                tip("one.ts", "**/*.ts"),
                tip("py.only", "**/*.py"),
                tip("two.ts", "**/*.ts"),
            ],
            &ImportantIgnoreList::default(),
            &HashSet::new(),
            "/w/src/a.ts",
            &GlobPathMatcher::new(),
        )
        .unwrap();
        assert_eq!(pending, ["one.ts", "two.ts"]);
    }

    #[test]
    fn ignore_persists_and_rehydrates() {
        let storage = MemoryStorage::new();
        let mut ignored = ImportantIgnoreList::hydrate(&storage);
        ignored.ignore("a.a", &storage).unwrap();
        ignored.ignore("b.b", &storage).unwrap();
        ignored.ignore("a.a", &storage).unwrap();

        let reloaded = ImportantIgnoreList::hydrate(&storage);
        assert_eq!(reloaded.ids(), ["a.a", "b.b"]);
    }
}
