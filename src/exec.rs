//! External command execution behind a mockable trait.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// `true` if the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
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

/// Runs programs on behalf of commands.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `program` in `dir`, returning its result whatever the exit status.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be started.
    fn run_unchecked_in(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecResult>;

    /// Resolve `program` on `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_unchecked_in(&self, dir: &Path, program: &str, args: &[String]) -> Result<ExecResult> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn run_echo_in_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        #[cfg(windows)]
        let result = SystemExecutor
            .run_unchecked_in(dir.path(), "cmd", &args(&["/C", "echo", "hello"]))
            .unwrap();
        #[cfg(not(windows))]
        let result = SystemExecutor
            .run_unchecked_in(dir.path(), "echo", &args(&["hello"]))
            .unwrap();
        assert!(result.success, "echo should succeed");
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn run_unchecked_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        #[cfg(windows)]
        let result = SystemExecutor
            .run_unchecked_in(dir.path(), "cmd", &args(&["/C", "exit", "1"]))
            .unwrap();
        #[cfg(not(windows))]
        let result = SystemExecutor
            .run_unchecked_in(dir.path(), "false", &[])
            .unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
        assert_eq!(result.code, Some(1));
    }

    #[test]
    fn missing_program_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            SystemExecutor
                .run_unchecked_in(dir.path(), "this-program-does-not-exist-12345", &[])
                .is_err()
        );
    }

    #[test]
    fn which_missing_program() {
        assert!(
            SystemExecutor
                .which("this-program-does-not-exist-12345")
                .is_none()
        );
    }
}
