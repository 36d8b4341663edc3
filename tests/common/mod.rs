// Shared helpers for integration tests.
//
// Provides a temporary workspace with product tips, a file-backed state
// directory and recording collaborators, so each scenario test can wire a
// real service without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use extension_tips::error::QueryError;
use extension_tips::extensions::{ExtensionKind, ExtensionQuery, InstalledExtension};
use extension_tips::matcher::GlobPathMatcher;
use extension_tips::notification::{Notification, NotificationSink, RecommendationsView};
use extension_tips::storage::FileStorage;
use extension_tips::{Collaborators, ExtensionTipsService, TipsConfig};

/// Installed-extension query answering a fixed list.
#[derive(Debug, Default)]
pub struct StaticQuery {
    pub installed: Vec<InstalledExtension>,
    pub calls: AtomicUsize,
}

impl StaticQuery {
    pub fn with(ids: &[&str]) -> Self {
        Self {
            installed: ids
                .iter()
                .filter_map(|id| InstalledExtension::parse(id))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ExtensionQuery for StaticQuery {
    async fn list_installed(
        &self,
        _: ExtensionKind,
    ) -> Result<Vec<InstalledExtension>, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.installed.clone())
    }
}

/// Sink keeping every notification for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap())
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.received.lock().unwrap().push(notification);
    }
}

/// View counting reveal requests.
#[derive(Debug, Default)]
pub struct CountingView {
    pub file: AtomicUsize,
    pub workspace: AtomicUsize,
}

impl RecommendationsView for CountingView {
    fn show_recommendations(&self) {
        self.file.fetch_add(1, Ordering::SeqCst);
    }

    fn show_workspace_recommendations(&self) {
        self.workspace.fetch_add(1, Ordering::SeqCst);
    }
}

/// An isolated host environment backed by a [`tempfile::TempDir`].
///
/// Holds a workspace folder, a product tips file and a state directory.
pub struct TipsTestContext {
    pub root: tempfile::TempDir,
}

impl TipsTestContext {
    pub fn workspace(&self) -> PathBuf {
        self.root.path().join("workspace")
    }

    pub fn product_file(&self) -> PathBuf {
        self.root.path().join("product.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    /// Load configuration the way a host would.
    pub fn load_config(&self) -> TipsConfig {
        let workspace = self.workspace();
        TipsConfig::load(&self.product_file(), Some(&workspace)).expect("load config")
    }

    /// A file store over this context's state directory.
    pub fn open_storage(&self) -> Arc<FileStorage> {
        Arc::new(FileStorage::open(&self.data_dir(), Some(&self.workspace())))
    }

    /// Wire a service and its doubles over freshly opened file storage.
    pub fn start(&self, query: StaticQuery) -> Running {
        let sink = Arc::new(RecordingSink::default());
        let view = Arc::new(CountingView::default());
        let query = Arc::new(query);
        let deps = Collaborators {
            storage: self.open_storage(),
            query: Arc::clone(&query) as Arc<dyn ExtensionQuery>,
            matcher: Arc::new(GlobPathMatcher::new()),
            sink: Arc::clone(&sink) as Arc<dyn NotificationSink>,
            view: Arc::clone(&view) as Arc<dyn RecommendationsView>,
        };
        let service =
            ExtensionTipsService::new(self.load_config(), deps, tokio::runtime::Handle::current());
        Running {
            service,
            sink,
            view,
            query,
        }
    }

    /// Absolute path of `relative` inside the workspace.
    pub fn doc(&self, relative: &str) -> PathBuf {
        self.workspace().join(relative)
    }
}

/// A started service plus the doubles it reports to.
pub struct Running {
    pub service: ExtensionTipsService,
    pub sink: Arc<RecordingSink>,
    pub view: Arc<CountingView>,
    pub query: Arc<StaticQuery>,
}

/// Fluent builder for [`TipsTestContext`].
pub struct TestContextBuilder {
    ctx: TipsTestContext,
}

impl TestContextBuilder {
    /// Begin building a context with an empty workspace folder.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("workspace")).expect("create workspace dir");
        Self {
            ctx: TipsTestContext { root },
        }
    }

    /// Write the product tips file.
    pub fn with_product_tips(self, content: &str) -> Self {
        std::fs::write(self.ctx.product_file(), content).expect("write product.toml");
        self
    }

    /// Write `.vscode/extensions.json` in the workspace.
    pub fn with_workspace_extensions(self, content: &str) -> Self {
        let dir = self.ctx.workspace().join(".vscode");
        std::fs::create_dir_all(&dir).expect("create .vscode dir");
        std::fs::write(dir.join("extensions.json"), content).expect("write extensions.json");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> TipsTestContext {
        self.ctx
    }
}

/// Read a state file as JSON, if present.
pub fn read_json(path: &Path) -> Option<serde_json::Value> {
    let text = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}
