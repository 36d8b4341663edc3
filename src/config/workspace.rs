//! Workspace-declared recommendations from `.vscode/extensions.json`.
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Shape of `.vscode/extensions.json`; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct ExtensionsFile {
    #[serde(default)]
    recommendations: Vec<String>,
}

/// Path of the workspace extensions file under `root`.
#[must_use]
pub fn extensions_file(root: &Path) -> PathBuf {
    root.join(".vscode").join("extensions.json")
}

/// Load the workspace's recommended extension ids, in declaration order.
///
/// A missing file or a file without `recommendations` yields an empty list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed. Comments and
/// trailing commas are accepted, as the editor accepts them.
pub fn load(root: &Path) -> Result<Vec<String>> {
    let path = extensions_file(root);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let parsed: ExtensionsFile = json5::from_str(&content).map_err(|e| ConfigError::InvalidJson {
        file: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(parsed.recommendations)
}
