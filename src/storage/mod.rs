//! Scoped key-value persistence for recommendation state.
//!
//! The store is the single source of truth: the engine hydrates from it at
//! construction and writes every mutation back to it. List values are JSON
//! arrays of strings; booleans are the strings `"true"` / `"false"`.
pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Accumulated file-type recommendations (global, JSON array).
pub const RECOMMENDATIONS_KEY: &str = "extensionsAssistant/recommendations";
/// Important recommendations the user dismissed forever (global, JSON array).
pub const IMPORTANT_IGNORE_KEY: &str = "extensionsAssistant/importantRecommendationsIgnore";
/// Whether workspace recommendations were dismissed (workspace, boolean).
pub const WORKSPACE_IGNORE_KEY: &str = "extensionsAssistant/workspaceRecommendationsIgnore";

/// Visibility of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Shared by every workspace of this user.
    Global,
    /// Private to the currently open workspace.
    Workspace,
}

/// Abstraction over the host's key-value state store.
pub trait Storage: Send + Sync {
    /// Return the value for `key` in `scope`, or `default` when absent.
    fn get(&self, key: &str, scope: StorageScope, default: &str) -> String;

    /// Store `value` under `key` in `scope`.
    ///
    /// Called synchronously, with engine state locked, from runtime tasks
    /// and from notification actions. Implementations may block on I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be made durable.
    fn set(&self, key: &str, scope: StorageScope, value: &str) -> Result<(), StorageError>;

    /// Return the boolean stored under `key`, or `default` when absent or not
    /// a boolean.
    fn get_boolean(&self, key: &str, scope: StorageScope, default: bool) -> bool {
        match self.get(key, scope, "").as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        }
    }
}

/// Read a JSON string array, treating absent or unparseable values as empty.
#[must_use]
pub fn read_string_list(storage: &dyn Storage, key: &str, scope: StorageScope) -> Vec<String> {
    let raw = storage.get(key, scope, "[]");
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::debug!("ignoring unparseable value for {key}: {e}");
        Vec::new()
    })
}

/// Write `items` as a JSON string array.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_string_list<S: AsRef<str>>(
    storage: &dyn Storage,
    key: &str,
    scope: StorageScope,
    items: &[S],
) -> Result<(), StorageError> {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    let value = serde_json::to_string(&items)?;
    storage.set(key, scope, &value)
}
