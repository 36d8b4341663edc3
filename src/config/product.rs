//! Product-level tip data (file-type and important recommendations).
use anyhow::{Context, Result};
use std::path::Path;

use super::toml_loader;

/// Tip tables shipped with the product.
///
/// Both tables are ordered `extension id → glob pattern` mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductTips {
    /// Silent file-type recommendations (`[tips]`).
    pub tips: Vec<(String, String)>,
    /// Individually notified recommendations (`[important_tips]`).
    pub important_tips: Vec<(String, String)>,
}

/// Load product tips from a TOML file.
///
/// A missing file, or missing sections, produce empty tables.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or a table entry is not a
/// string pattern.
pub fn load(path: &Path) -> Result<ProductTips> {
    let table = toml_loader::load_table(path)?;
    let tips = toml_loader::string_pairs(&table, "tips")
        .with_context(|| format!("reading [tips] from {}", path.display()))?;
    let important_tips = toml_loader::string_pairs(&table, "important_tips")
        .with_context(|| format!("reading [important_tips] from {}", path.display()))?;
    Ok(ProductTips {
        tips,
        important_tips,
    })
}
