//! Installed-extension query backed by the VS Code CLI.
use std::sync::Arc;

use async_trait::async_trait;

use super::{ExtensionKind, ExtensionQuery, InstalledExtension};
use crate::error::QueryError;
use crate::exec::{ExecResult, Executor, SystemExecutor};

/// Lists user extensions with `<code> --list-extensions`.
///
/// The CLI only knows about user-installed extensions, so
/// [`ExtensionKind::System`] always yields an empty list.
pub struct CodeCliQuery {
    code_cmd: String,
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for CodeCliQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeCliQuery")
            .field("code_cmd", &self.code_cmd)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl CodeCliQuery {
    /// Create a query for an explicit CLI command.
    #[must_use]
    pub fn new(code_cmd: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        Self {
            code_cmd: code_cmd.into(),
            executor,
        }
    }

    /// Locate the VS Code CLI on PATH using real processes.
    #[must_use]
    pub fn detect() -> Option<Self> {
        let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
        let cmd = find_code_command(&*executor)?;
        Some(Self::new(cmd, executor))
    }

    /// CLI command this query runs.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.code_cmd
    }
}

#[async_trait]
impl ExtensionQuery for CodeCliQuery {
    async fn list_installed(
        &self,
        kind: ExtensionKind,
    ) -> Result<Vec<InstalledExtension>, QueryError> {
        if kind == ExtensionKind::System {
            return Ok(Vec::new());
        }

        let cmd = self.code_cmd.clone();
        let executor = Arc::clone(&self.executor);
        let result = tokio::task::spawn_blocking(move || {
            run_code_cmd(&cmd, &["--list-extensions"], &*executor)
        })
        .await
        .map_err(|e| QueryError::Join(e.to_string()))?
        .map_err(|e| QueryError::Command {
            command: self.code_cmd.clone(),
            reason: format!("{e:#}"),
        })?;

        if !result.success {
            tracing::debug!(
                "{} --list-extensions exited with {:?}: {}",
                self.code_cmd,
                result.code,
                result.stderr.trim()
            );
            return Ok(Vec::new());
        }
        Ok(parse_listing(&result.stdout))
    }
}

/// Find the VS Code CLI command, preferring code-insiders.
#[must_use]
pub fn find_code_command(executor: &dyn Executor) -> Option<String> {
    ["code-insiders", "code"]
        .into_iter()
        .find(|cmd| executor.which(cmd))
        .map(str::to_string)
}

/// Parse one `publisher.name` per line, skipping blanks and malformed lines.
fn parse_listing(stdout: &str) -> Vec<InstalledExtension> {
    stdout.lines().filter_map(InstalledExtension::parse).collect()
}

/// Run a VS Code CLI command. On Windows, `.cmd` wrappers need `cmd.exe /C`.
fn run_code_cmd(cmd: &str, args: &[&str], executor: &dyn Executor) -> anyhow::Result<ExecResult> {
    #[cfg(target_os = "windows")]
    {
        let mut full_args = vec!["/C", cmd];
        full_args.extend(args);
        executor.run_unchecked("cmd", &full_args)
    }

    #[cfg(not(target_os = "windows"))]
    {
        executor.run_unchecked(cmd, args)
    }
}
