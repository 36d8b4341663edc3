//! Glob matching of document paths against tip patterns.
use std::collections::HashMap;
use std::sync::Mutex;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::MatchError;

/// Decides whether a document path matches a tip pattern.
///
/// `Ok(false)` is an ordinary miss. `Err` is a matcher fault and aborts the
/// deferred unit evaluating it.
pub trait PathMatcher: Send + Sync {
    /// Match `path` against `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error when the matcher itself fails.
    fn is_match(&self, pattern: &str, path: &str) -> Result<bool, MatchError>;
}

/// [`PathMatcher`] built on `globset`, with compiled patterns cached.
///
/// Supports `*`, `?`, `**`, `[...]` classes and `{a,b}` alternation. `*` does
/// not cross `/`. Patterns that fail to compile never match; they are logged
/// once and cached as misses.
#[derive(Debug, Default)]
pub struct GlobPathMatcher {
    cache: Mutex<HashMap<String, Option<GlobMatcher>>>,
}

impl GlobPathMatcher {
    /// Create a matcher with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn compile(pattern: &str) -> Option<GlobMatcher> {
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(e) => {
                tracing::warn!("invalid tip pattern '{pattern}' never matches: {e}");
                None
            }
        }
    }
}

impl PathMatcher for GlobPathMatcher {
    fn is_match(&self, pattern: &str, path: &str) -> Result<bool, MatchError> {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let compiled = cache
            .entry(pattern.to_string())
            .or_insert_with(|| Self::compile(pattern));
        Ok(compiled.as_ref().is_some_and(|m| m.is_match(path)))
    }
}
