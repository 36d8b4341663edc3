//! TOML tip-table parsing with insertion order preserved.
use anyhow::{Context, Result};
use std::path::Path;

use crate::error::ConfigError;

/// Load a TOML file as an ordered table.
///
/// A missing file yields an empty table so that an unconfigured product
/// simply has no tips.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_table(path: &Path) -> Result<toml::Table> {
    if !path.exists() {
        return Ok(toml::Table::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}

/// Extract a `key = "value"` sub-table as ordered `(key, value)` pairs.
///
/// An absent section yields an empty list. Entries keep the order in which
/// they appear in the file.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTip`] if the section is not a table or one
/// of its values is not a string.
pub fn string_pairs(
    root: &toml::Table,
    section: &str,
) -> Result<Vec<(String, String)>, ConfigError> {
    let Some(value) = root.get(section) else {
        return Ok(Vec::new());
    };
    let Some(table) = value.as_table() else {
        return Err(ConfigError::InvalidTip {
            table: section.to_string(),
            id: section.to_string(),
        });
    };

    table
        .iter()
        .map(|(id, pattern)| {
            pattern
                .as_str()
                .map(|p| (id.clone(), p.to_string()))
                .ok_or_else(|| ConfigError::InvalidTip {
                    table: section.to_string(),
                    id: id.clone(),
                })
        })
        .collect()
}
