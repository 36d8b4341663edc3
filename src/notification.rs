//! Notification and action types handed to the host UI.
//!
//! The engine builds [`Notification`]s with callback-carrying
//! [`NotificationAction`]s and passes them to a [`NotificationSink`]. What the
//! sink shows, and whether it ever runs an action, is up to the host.

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational prompt.
    Info,
    /// Something the user should look at.
    Warning,
    /// A failure.
    Error,
}

/// What an action does, so hosts and tests can find it without matching labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Open the recommendations view.
    ShowRecommendations,
    /// Permanently dismiss this recommendation.
    NeverShowAgain,
}

/// A user-selectable action attached to a notification.
pub struct NotificationAction {
    /// Button label.
    pub label: String,
    /// Role of the action.
    pub kind: ActionKind,
    run: Box<dyn FnOnce() + Send>,
}

impl std::fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl NotificationAction {
    /// Create an action running `run` when chosen.
    pub fn new(
        label: impl Into<String>,
        kind: ActionKind,
        run: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            run: Box::new(run),
        }
    }

    /// Perform the action. Actions are single-use.
    pub fn run(self) {
        (self.run)();
    }
}

/// A message plus the actions offered with it.
#[derive(Debug)]
pub struct Notification {
    /// Severity to display with.
    pub severity: Severity,
    /// User-facing text.
    pub message: String,
    /// Extension ids the notification recommends.
    pub recommendations: Vec<String>,
    /// Offered actions, in display order.
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// Remove and return the first action of `kind`.
    pub fn take_action(&mut self, kind: ActionKind) -> Option<NotificationAction> {
        let index = self.actions.iter().position(|a| a.kind == kind)?;
        Some(self.actions.remove(index))
    }

    /// Labels of the offered actions, in display order.
    #[must_use]
    pub fn action_labels(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.label.as_str()).collect()
    }
}

/// Receives notifications produced by the engine.
pub trait NotificationSink: Send + Sync {
    /// Display `notification`; running its actions is the sink's choice.
    fn notify(&self, notification: Notification);
}

/// External views the "show recommendations" actions delegate to.
pub trait RecommendationsView: Send + Sync {
    /// Reveal the file-based recommendations list.
    fn show_recommendations(&self);
    /// Reveal the workspace recommendations list.
    fn show_workspace_recommendations(&self);
}

/// A [`NotificationSink`] that only logs messages and drops the actions.
///
/// Suitable for headless hosts where nobody can answer a prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notification: Notification) {
        let labels = notification.action_labels().join(", ");
        match notification.severity {
            Severity::Error => tracing::error!("{} [{labels}]", notification.message),
            Severity::Warning => tracing::warn!("{} [{labels}]", notification.message),
            Severity::Info => tracing::info!("{} [{labels}]", notification.message),
        }
    }
}

/// A [`RecommendationsView`] with nothing to show.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopView;

impl RecommendationsView for NoopView {
    fn show_recommendations(&self) {}
    fn show_workspace_recommendations(&self) {}
}

/// Label of the action revealing recommendations.
pub const SHOW_RECOMMENDATIONS_LABEL: &str = "Show Recommendations";
/// Label of the action dismissing a recommendation for good.
pub const NEVER_SHOW_AGAIN_LABEL: &str = "Don't Show Again";

/// Message for an important, file-type recommendation.
#[must_use]
pub fn important_message(extension_id: &str) -> String {
    format!("It is recommended to install the '{extension_id}' extension.")
}

/// Message for the workspace recommendation batch.
#[must_use]
pub fn workspace_message(pending: &[String]) -> String {
    if pending.len() == 1 {
        "This workspace has an extension recommendation.".to_string()
    } else {
        format!("This workspace has {} extension recommendations.", pending.len())
    }
}
