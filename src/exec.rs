//! Process execution seam used to query the editor CLI.
use anyhow::{Context, Result};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, when the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over running external programs (injectable for testing).
pub trait Executor: Send + Sync {
    /// Run a command, allowing failure (returns result without bailing).
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be spawned.
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;

        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Shared test doubles for executor-backed code.
#[cfg(test)]
pub mod test_helpers {
    use super::{ExecResult, Executor};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A mock executor answering from a FIFO queue of `(success, stdout)`.
    ///
    /// An exhausted queue answers with a failed, empty result.
    #[derive(Debug)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<(bool, String)>>,
        which_result: bool,
        spawn_fails: bool,
        call_count: AtomicUsize,
    }

    impl MockExecutor {
        /// A mock with a single successful response; every program is on PATH.
        #[must_use]
        pub fn ok(stdout: &str) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([(true, stdout.to_string())])),
                which_result: true,
                spawn_fails: false,
                call_count: AtomicUsize::new(0),
            }
        }

        /// A mock whose command exits non-zero.
        #[must_use]
        pub fn fail() -> Self {
            Self {
                responses: Mutex::new(VecDeque::from([(false, String::new())])),
                ..Self::ok("")
            }
        }

        /// A mock whose command cannot be spawned at all.
        #[must_use]
        pub fn unspawnable() -> Self {
            Self {
                spawn_fails: true,
                ..Self::ok("")
            }
        }

        /// Set the value returned by every [`Executor::which`] call.
        #[must_use]
        pub fn with_which(mut self, result: bool) -> Self {
            self.which_result = result;
            self
        }

        /// Number of `run_unchecked` calls made so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl Executor for MockExecutor {
        fn run_unchecked(&self, program: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.spawn_fails {
                anyhow::bail!("failed to execute: {program}");
            }
            let (success, stdout) = self
                .responses
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| (false, String::new()));
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success,
                code: Some(i32::from(!success)),
            })
        }

        fn which(&self, _: &str) -> bool {
            self.which_result
        }
    }
}
