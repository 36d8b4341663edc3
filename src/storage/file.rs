//! JSON-file storage backend with a global and a per-workspace file.
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest as _, Sha256};

use super::{Storage, StorageScope};
use crate::error::StorageError;

const STATE_FILE: &str = "state.json";

/// A [`Storage`] persisted as flat JSON objects on disk.
///
/// Layout under `data_dir`:
///
/// ```text
/// globalStorage/state.json
/// workspaceStorage/<sha256 of workspace root>/state.json
/// ```
///
/// Both files are read once at [`open`](Self::open); every [`set`](Storage::set)
/// rewrites the owning file through a temp file and rename. The in-memory view
/// is updated before the write, so a failed write still leaves this process
/// reading the latest value.
#[derive(Debug)]
pub struct FileStorage {
    global_path: PathBuf,
    workspace_path: Option<PathBuf>,
    state: Mutex<HashMap<StorageScope, BTreeMap<String, String>>>,
}

impl FileStorage {
    /// Open (without creating) the state files for `workspace_root`.
    ///
    /// Missing or corrupt files start empty. With no workspace open,
    /// workspace reads return their default and writes fail with
    /// [`StorageError::NoWorkspace`].
    #[must_use]
    pub fn open(data_dir: &Path, workspace_root: Option<&Path>) -> Self {
        let global_path = data_dir.join("globalStorage").join(STATE_FILE);
        let workspace_path = workspace_root.map(|root| {
            data_dir
                .join("workspaceStorage")
                .join(workspace_id(root))
                .join(STATE_FILE)
        });

        let mut state = HashMap::new();
        state.insert(StorageScope::Global, read_state(&global_path));
        if let Some(path) = &workspace_path {
            state.insert(StorageScope::Workspace, read_state(path));
        }

        Self {
            global_path,
            workspace_path,
            state: Mutex::new(state),
        }
    }

    fn path_for(&self, scope: StorageScope) -> Option<&Path> {
        match scope {
            StorageScope::Global => Some(&self.global_path),
            StorageScope::Workspace => self.workspace_path.as_deref(),
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str, scope: StorageScope, default: &str) -> String {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&scope)
            .and_then(|entries| entries.get(key))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set(&self, key: &str, scope: StorageScope, value: &str) -> Result<(), StorageError> {
        let Some(path) = self.path_for(scope) else {
            return Err(StorageError::NoWorkspace(key.to_string()));
        };

        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let entries = state.entry(scope).or_default();
        entries.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(entries)?;
        write_atomic(path, &content)
    }
}

/// Stable directory name for a workspace root.
#[must_use]
pub fn workspace_id(root: &Path) -> String {
    let digest = Sha256::digest(root.to_string_lossy().as_bytes());
    format!("{digest:x}")
}

/// Default data directory: `$XDG_DATA_HOME/extension-tips`, falling back to
/// `~/.local/share/extension-tips`.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    data_dir_from(std::env::var_os("XDG_DATA_HOME"), home)
}

fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map_or_else(
            || {
                home.map_or_else(|| PathBuf::from("."), PathBuf::from)
                    .join(".local")
                    .join("share")
            },
            PathBuf::from,
        )
        .join("extension-tips")
}

fn read_state(path: &Path) -> BTreeMap<String, String> {
    let Ok(content) = fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("ignoring corrupt state file {}: {e}", path.display());
        BTreeMap::new()
    })
}

fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}
