//! One-shot gate for workspace-declared recommendations.
use std::collections::HashSet;

use crate::error::StorageError;
use crate::extensions::is_installed;
use crate::storage::{Storage, StorageScope, WORKSPACE_IGNORE_KEY};

/// Whether workspace recommendations were dismissed for this workspace.
#[must_use]
pub fn is_dismissed(storage: &dyn Storage) -> bool {
    storage.get_boolean(WORKSPACE_IGNORE_KEY, StorageScope::Workspace, false)
}

/// Persist the dismissal for this workspace.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn dismiss(storage: &dyn Storage) -> Result<(), StorageError> {
    storage.set(WORKSPACE_IGNORE_KEY, StorageScope::Workspace, "true")
}

/// Declared recommendations not yet satisfied by an installed extension.
#[must_use]
pub fn pending_workspace(declared: &[String], installed: &HashSet<String>) -> Vec<String> {
    declared
        .iter()
        .filter(|id| !is_installed(installed, id))
        .cloned()
        .collect()
}
