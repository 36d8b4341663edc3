//! Domain-specific error types for the extension tips engine.
//!
//! Each seam returns its own typed error. Loaders at the host boundary
//! convert [`ConfigError`] to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error kinds
//!
//! ```text
//! ConfigError   # product tips, workspace extensions.json
//! StorageError  # key-value state persistence
//! QueryError    # installed-extension listing
//! MatchError    # glob matcher faults
//! ```
//!
//! Inside a deferred recommendation unit only a [`MatchError`] aborts the
//! unit. Storage and query failures are logged and the unit carries on.

use thiserror::Error;

/// Errors that arise while loading tip data or workspace recommendations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A tip table entry maps an id to something other than a pattern string.
    #[error("Invalid tip entry '{id}' in [{table}]: pattern must be a string")]
    InvalidTip {
        /// Table the entry was found in (e.g. `tips`).
        table: String,
        /// Extension id of the offending entry.
        id: String,
    },

    /// A JSON configuration file could not be parsed.
    #[error("Invalid JSON in {file}: {message}")]
    InvalidJson {
        /// Path of the file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from the key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A workspace-scoped write was attempted without an open workspace.
    #[error("No workspace is open; cannot write workspace key '{0}'")]
    NoWorkspace(String),

    /// The state file could not be serialized.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The state file could not be written.
    #[error("IO error writing state file {path}: {source}")]
    Io {
        /// Path of the state file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while listing installed extensions.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The editor CLI could not be executed.
    #[error("Failed to run '{command}': {reason}")]
    Command {
        /// CLI command that was attempted.
        command: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The blocking query thread was cancelled or panicked.
    #[error("Extension query task failed: {0}")]
    Join(String),
}

/// Faults reported by a glob matcher.
///
/// A non-matching path is `Ok(false)`, never an error.
#[derive(Error, Debug)]
pub enum MatchError {
    /// The matcher could not evaluate a pattern.
    #[error("Matcher failed on pattern '{pattern}': {reason}")]
    Failed {
        /// Pattern being evaluated.
        pattern: String,
        /// Human-readable reason.
        reason: String,
    },
}
