// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! External tool adapters
//!
//! Each stage of the pipeline delegates its real work to an external binary.
//! The adapters here build argument vectors deterministically from stage
//! inputs, run the subprocess to completion, and return an explicit
//! [`ToolOutcome`] so the runner can make its failure-policy decision on a
//! concrete exit status instead of an unexamined return value. Failure to
//! launch the binary at all is a separate error ([`CollectError::ToolLaunch`]).

mod cochange;
mod extractor;
mod vcs;

pub use cochange::CochangeTool;
pub use extractor::DependsExtractor;
pub use vcs::GitClient;

use async_trait::async_trait;
use tokio::process::Command;

use crate::errors::{CollectError, CollectResult};

/// Captured result of one external tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Process exit code (-1 if terminated by signal)
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl ToolOutcome {
    /// Whether the tool reported success
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// First non-empty line of stderr, for one-line narration
    pub fn brief_stderr(&self) -> Option<&str> {
        self.stderr.lines().map(str::trim).find(|l| !l.is_empty())
    }
}

/// Run a prepared command to completion, capturing output.
///
/// Blocks the pipeline until the subprocess exits; there is no timeout or
/// cancellation mechanism.
pub(crate) async fn run_tool(tool: &str, cmd: &mut Command) -> CollectResult<ToolOutcome> {
    tracing::debug!(tool, command = ?cmd.as_std(), "invoking external tool");

    let output = cmd.output().await.map_err(|e| CollectError::ToolLaunch {
        tool: tool.to_string(),
        error: e.to_string(),
        help: Some(format!("Check that '{}' is installed and executable", tool)),
    })?;

    Ok(ToolOutcome {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Common surface for preflight checks over the external tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Short tool name for narration and diagnostics
    fn name(&self) -> &str;

    /// Check the tool can actually be invoked
    async fn check_available(&self) -> CollectResult<bool>;

    /// Tool version string, where the tool reports one
    async fn version(&self) -> CollectResult<String>;
}

/// First line of a version banner, trimmed
pub(crate) fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or("unknown").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success() {
        let ok = ToolOutcome {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(ok.success());

        let failed = ToolOutcome {
            exit_code: 128,
            stdout: String::new(),
            stderr: "fatal: repository not found\n".into(),
        };
        assert!(!failed.success());
        assert_eq!(failed.brief_stderr(), Some("fatal: repository not found"));
    }

    #[tokio::test]
    async fn test_run_tool_missing_binary() {
        let mut cmd = Command::new("/nonexistent/cocollect-test-binary");
        let err = run_tool("missing", &mut cmd).await.unwrap_err();
        assert!(matches!(err, CollectError::ToolLaunch { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_tool_captures_output() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo out; echo err >&2; exit 3");

        let outcome = run_tool("sh", &mut cmd).await.unwrap();
        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.stdout.trim(), "out");
        assert_eq!(outcome.stderr.trim(), "err");
    }
}
