//! Tip data and workspace recommendation configuration.
pub mod product;
pub mod toml_loader;
pub mod workspace;

use anyhow::{Context, Result};
use std::path::Path;

/// Everything the recommendation engine is configured with.
///
/// Injected at construction; the engine never reads ambient product state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TipsConfig {
    /// File-type tips as an ordered `extension id → glob pattern` mapping.
    pub tips: Vec<(String, String)>,
    /// Important tips as an ordered `extension id → glob pattern` mapping.
    pub important_tips: Vec<(String, String)>,
    /// Recommendation ids declared by the open workspace, in file order.
    pub workspace_recommendations: Vec<String>,
}

impl TipsConfig {
    /// Load product tips from `product_file` and, when a workspace is open,
    /// its declared recommendations.
    ///
    /// # Errors
    ///
    /// Returns an error if either file exists but cannot be parsed.
    pub fn load(product_file: &Path, workspace_root: Option<&Path>) -> Result<Self> {
        let product = product::load(product_file)
            .with_context(|| format!("loading {}", product_file.display()))?;

        let workspace_recommendations = match workspace_root {
            Some(root) => workspace::load(root).with_context(|| {
                format!("loading {}", workspace::extensions_file(root).display())
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            tips: product.tips,
            important_tips: product.important_tips,
            workspace_recommendations,
        })
    }

    /// Whether the tip map is empty.
    ///
    /// Without file tips the engine does no document work at all, so
    /// important tips are never evaluated either.
    #[must_use]
    pub fn has_no_tips(&self) -> bool {
        self.tips.is_empty()
    }
}
