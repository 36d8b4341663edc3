//! The recommendation service: deferred document units and the workspace check.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::accumulator::RecommendationSet;
use super::important::{ImportantIgnoreList, pending_important};
use super::index::{ImportantTip, PatternIndex};
use super::workspace;
use crate::config::TipsConfig;
use crate::error::MatchError;
use crate::extensions::{ExtensionKind, ExtensionQuery, installed_keys};
use crate::matcher::PathMatcher;
use crate::notification::{
    ActionKind, NEVER_SHOW_AGAIN_LABEL, Notification, NotificationAction, NotificationSink,
    RecommendationsView, SHOW_RECOMMENDATIONS_LABEL, Severity, important_message,
    workspace_message,
};
use crate::storage::Storage;

/// A document the host has opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentObserved {
    /// Filesystem path of the document.
    pub path: PathBuf,
}

impl DocumentObserved {
    /// Event for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// External collaborators the service is wired to.
#[derive(Clone)]
pub struct Collaborators {
    /// Scoped key-value state store.
    pub storage: Arc<dyn Storage>,
    /// Source of installed extensions.
    pub query: Arc<dyn ExtensionQuery>,
    /// Glob matcher for tip patterns.
    pub matcher: Arc<dyn PathMatcher>,
    /// Where notifications go.
    pub sink: Arc<dyn NotificationSink>,
    /// Target of the "show recommendations" actions.
    pub view: Arc<dyn RecommendationsView>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("storage", &"<dyn Storage>")
            .field("query", &"<dyn ExtensionQuery>")
            .field("matcher", &"<dyn PathMatcher>")
            .field("sink", &"<dyn NotificationSink>")
            .field("view", &"<dyn RecommendationsView>")
            .finish()
    }
}

/// State shared by every deferred unit of one service.
struct Engine {
    index: PatternIndex,
    important_tips: Vec<ImportantTip>,
    workspace_recommendations: Vec<String>,
    recommendations: Mutex<RecommendationSet>,
    important_ignore: Arc<Mutex<ImportantIgnoreList>>,
    workspace_checked: AtomicBool,
    deps: Collaborators,
}

/// Recommends extensions for opened documents and for the open workspace.
///
/// [`observe`](Self::observe) and [`run_once`](Self::run_once) spawn their
/// work on the runtime and return at once; the returned handles may be
/// ignored. Within one document unit the steps run strictly in order:
/// match, persist recommendations, await the installed-extension query,
/// evaluate important tips, notify. State locks are never held across the
/// query.
pub struct ExtensionTipsService {
    engine: Arc<Engine>,
    runtime: Handle,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for ExtensionTipsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionTipsService")
            .field("rules", &self.engine.index.rules().len())
            .field("important_tips", &self.engine.important_tips.len())
            .field("workspace_recommendations", &self.engine.workspace_recommendations)
            .field("deps", &self.engine.deps)
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ExtensionTipsService {
    /// Build the pattern index and hydrate persisted state.
    ///
    /// Work is spawned on `runtime`.
    #[must_use]
    pub fn new(config: TipsConfig, deps: Collaborators, runtime: Handle) -> Self {
        if config.has_no_tips() {
            tracing::debug!("no file tips configured, document matching disabled");
        }
        let recommendations = RecommendationSet::hydrate(&*deps.storage);
        let important_ignore = ImportantIgnoreList::hydrate(&*deps.storage);
        tracing::debug!(
            "hydrated {} recommendations and {} ignored important tips",
            recommendations.len(),
            important_ignore.ids().len()
        );

        let engine = Engine {
            index: PatternIndex::build(&config.tips),
            important_tips: ImportantTip::from_map(&config.important_tips),
            workspace_recommendations: config.workspace_recommendations,
            recommendations: Mutex::new(recommendations),
            important_ignore: Arc::new(Mutex::new(important_ignore)),
            workspace_checked: AtomicBool::new(false),
            deps,
        };

        Self {
            engine: Arc::new(engine),
            runtime,
            subscription: Mutex::new(None),
        }
    }

    /// Ids recommended so far, sorted.
    #[must_use]
    pub fn get_recommendations(&self) -> Vec<String> {
        lock(&self.engine.recommendations).to_sorted_vec()
    }

    /// Workspace-declared ids as configured, unfiltered.
    #[must_use]
    pub fn get_workspace_recommendations(&self) -> Vec<String> {
        self.engine.workspace_recommendations.clone()
    }

    /// Queue the recommendation unit for a newly observed document.
    pub fn observe(&self, path: impl AsRef<Path>) -> JoinHandle<()> {
        spawn_unit(
            &self.runtime,
            Arc::clone(&self.engine),
            path.as_ref().to_string_lossy().into_owned(),
        )
    }

    /// Queue the workspace recommendation check.
    ///
    /// Only the first call in a service's lifetime does anything.
    pub fn run_once(&self) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        self.runtime.spawn(async move {
            if engine.workspace_checked.swap(true, Ordering::SeqCst) {
                tracing::debug!("workspace recommendations already checked");
                return;
            }
            engine.check_workspace().await;
        })
    }

    /// Feed every event from `events` to [`observe`](Self::observe) until the
    /// channel closes or the service is disposed.
    ///
    /// Replaces any previous subscription.
    pub fn subscribe(&self, mut events: mpsc::UnboundedReceiver<DocumentObserved>) {
        let engine = Arc::clone(&self.engine);
        let runtime = self.runtime.clone();
        let listener = self.runtime.spawn(async move {
            while let Some(event) = events.recv().await {
                spawn_unit(
                    &runtime,
                    Arc::clone(&engine),
                    event.path.to_string_lossy().into_owned(),
                );
            }
            tracing::debug!("document event channel closed");
        });

        if let Some(previous) = lock(&self.subscription).replace(listener) {
            previous.abort();
        }
    }

    /// Release the document-event subscription.
    ///
    /// Units already queued still run to completion; persisted state needs no
    /// flushing.
    pub fn dispose(&self) {
        if let Some(listener) = lock(&self.subscription).take() {
            listener.abort();
            tracing::debug!("document event subscription released");
        }
    }
}

impl Drop for ExtensionTipsService {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Run a synchronous store write, moving it off the worker on a
/// multi-thread runtime so a slow backend does not stall other units.
fn blocking_write<R>(write: impl FnOnce() -> R) -> R {
    match Handle::try_current().map(|h| h.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(write),
        _ => write(),
    }
}

fn spawn_unit(runtime: &Handle, engine: Arc<Engine>, path: String) -> JoinHandle<()> {
    runtime.spawn(async move {
        if let Err(e) = engine.process_document(&path).await {
            tracing::warn!("recommendation unit for {path} aborted: {e}");
        }
    })
}

impl Engine {
    /// An empty tip map disables all document work, important tips included.
    fn is_inert(&self) -> bool {
        self.index.is_empty()
    }

    async fn process_document(&self, path: &str) -> Result<(), MatchError> {
        if self.is_inert() {
            return Ok(());
        }

        self.accumulate(path)?;

        if self.important_tips.is_empty() {
            return Ok(());
        }
        let installed = self.installed_keys().await;

        let pending = {
            let ignored = lock(&*self.important_ignore);
            pending_important(
                &self.important_tips,
                &ignored,
                &installed,
                path,
                &*self.deps.matcher,
            )?
        };

        for id in pending {
            tracing::info!("recommending {id} for {path}");
            self.deps.sink.notify(self.important_notification(id));
        }
        Ok(())
    }

    /// Match every rule and persist the set if it grew.
    fn accumulate(&self, path: &str) -> Result<(), MatchError> {
        let matched = self.index.matching_ids(path, &*self.deps.matcher)?;
        if matched.is_empty() {
            return Ok(());
        }

        blocking_write(|| {
            let mut recommendations = lock(&self.recommendations);
            if recommendations.insert_all(matched) {
                tracing::debug!("recommendations now {:?}", recommendations.to_sorted_vec());
                if let Err(e) = recommendations.persist(&*self.deps.storage) {
                    tracing::warn!("failed to persist recommendations: {e}");
                }
            }
        });
        Ok(())
    }

    /// Installed `publisher.name` keys; a failed query counts as none installed.
    async fn installed_keys(&self) -> HashSet<String> {
        match self.deps.query.list_installed(ExtensionKind::All).await {
            Ok(installed) => installed_keys(&installed),
            Err(e) => {
                tracing::warn!("installed extension query failed, assuming none: {e}");
                HashSet::new()
            }
        }
    }

    async fn check_workspace(&self) {
        let storage = &*self.deps.storage;
        if workspace::is_dismissed(storage) {
            tracing::debug!("workspace recommendations dismissed for this workspace");
            return;
        }
        if self.workspace_recommendations.is_empty() {
            return;
        }

        let installed = self.installed_keys().await;
        let pending = workspace::pending_workspace(&self.workspace_recommendations, &installed);
        if pending.is_empty() {
            tracing::debug!("all workspace recommendations are installed");
            return;
        }

        tracing::info!("workspace recommends {}", pending.join(", "));
        self.deps.sink.notify(self.workspace_notification(&pending));
    }

    fn important_notification(&self, id: String) -> Notification {
        let view = Arc::clone(&self.deps.view);
        let ignore = Arc::clone(&self.important_ignore);
        let storage = Arc::clone(&self.deps.storage);
        let message = important_message(&id);

        Notification {
            severity: Severity::Info,
            message,
            recommendations: vec![id.clone()],
            actions: vec![
                NotificationAction::new(
                    SHOW_RECOMMENDATIONS_LABEL,
                    ActionKind::ShowRecommendations,
                    move || view.show_recommendations(),
                ),
                NotificationAction::new(
                    NEVER_SHOW_AGAIN_LABEL,
                    ActionKind::NeverShowAgain,
                    move || {
                        if let Err(e) = lock(&*ignore).ignore(&id, &*storage) {
                            tracing::warn!("failed to persist ignore for {id}: {e}");
                        }
                    },
                ),
            ],
        }
    }

    fn workspace_notification(&self, pending: &[String]) -> Notification {
        let view = Arc::clone(&self.deps.view);
        let storage = Arc::clone(&self.deps.storage);

        Notification {
            severity: Severity::Info,
            message: workspace_message(pending),
            recommendations: pending.to_vec(),
            actions: vec![
                NotificationAction::new(
                    SHOW_RECOMMENDATIONS_LABEL,
                    ActionKind::ShowRecommendations,
                    move || view.show_workspace_recommendations(),
                ),
                NotificationAction::new(
                    NEVER_SHOW_AGAIN_LABEL,
                    ActionKind::NeverShowAgain,
                    move || {
                        if let Err(e) = workspace::dismiss(&*storage) {
                            tracing::warn!("failed to persist workspace dismissal: {e}");
                        }
                    },
                ),
            ],
        }
    }
}
