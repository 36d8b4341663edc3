//! Installed-extension model and the async query seam.
pub mod code_cli;

pub use code_cli::CodeCliQuery;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::QueryError;

/// Which installed extensions to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    /// Extensions bundled with the editor.
    System,
    /// Extensions the user installed.
    User,
    /// Both of the above.
    All,
}

/// Manifest identity of a locally installed extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledExtension {
    /// Manifest `publisher` field.
    pub publisher: String,
    /// Manifest `name` field.
    pub name: String,
}

impl InstalledExtension {
    /// Build from manifest fields.
    #[must_use]
    pub fn new(publisher: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            publisher: publisher.into(),
            name: name.into(),
        }
    }

    /// Parse a `publisher.name` identifier (as printed by the editor CLI).
    ///
    /// Returns `None` when either half is missing.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        let (publisher, name) = id.trim().split_once('.')?;
        if publisher.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(publisher, name))
    }

    /// The `publisher.name` key recommendations are compared against.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}

/// Async source of installed extensions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtensionQuery: Send + Sync {
    /// List installed extensions of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing could not be produced; callers treat
    /// that as "nothing installed".
    async fn list_installed(
        &self,
        kind: ExtensionKind,
    ) -> Result<Vec<InstalledExtension>, QueryError>;
}

/// Lower-cased `publisher.name` keys for membership testing.
#[must_use]
pub fn installed_keys(installed: &[InstalledExtension]) -> HashSet<String> {
    installed.iter().map(|e| e.key().to_lowercase()).collect()
}

/// Whether recommendation `id` is satisfied by one of `keys`.
///
/// Extension ids are case-insensitive.
#[must_use]
pub fn is_installed(keys: &HashSet<String>, id: &str) -> bool {
    keys.contains(&id.to_lowercase())
}
