// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Version-control adapter
//!
//! Wraps the three git operations the pipeline needs: clone, checkout at a
//! pinned revision, and resolution of a revision to its canonical commit id.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::{first_line, run_tool, Tool, ToolOutcome};
use crate::errors::{CollectError, CollectResult};

/// git subprocess adapter
#[derive(Debug)]
pub struct GitClient {
    git_bin: PathBuf,
}

impl GitClient {
    /// Create a new git client, resolving the binary on PATH
    pub fn new(git_bin: &Path) -> CollectResult<Self> {
        let git_bin = which::which(git_bin).map_err(|_| CollectError::tool_not_found("git"))?;
        Ok(Self { git_bin })
    }

    /// `git clone <origin> <dest>`
    pub async fn clone_repo(&self, origin: &str, dest: &Path) -> CollectResult<ToolOutcome> {
        let mut cmd = Command::new(&self.git_bin);
        cmd.arg("clone").arg(origin).arg(dest);
        run_tool("git", &mut cmd).await
    }

    /// `git checkout <revision>` in the working copy, detached-HEAD advice
    /// suppressed since pinning to tags is the normal case
    pub async fn checkout(&self, revision: &str, workdir: &Path) -> CollectResult<ToolOutcome> {
        let mut cmd = Command::new(&self.git_bin);
        cmd.arg("-c")
            .arg("advice.detachedHead=false")
            .arg("checkout")
            .arg(revision);
        cmd.current_dir(workdir);
        run_tool("git", &mut cmd).await
    }

    /// Resolve a revision (tag, branch, or commit) to a single commit id via
    /// `git rev-list -n 1 <revision>`.
    ///
    /// Unlike the other operations this one must produce a value, so a
    /// non-zero exit is an error rather than an outcome.
    pub async fn resolve_revision(&self, revision: &str, workdir: &Path) -> CollectResult<String> {
        let mut cmd = Command::new(&self.git_bin);
        cmd.arg("rev-list").arg("-n").arg("1").arg(revision);
        cmd.current_dir(workdir);

        let outcome = run_tool("git", &mut cmd).await?;
        if !outcome.success() {
            return Err(CollectError::RevisionResolution {
                revision: revision.to_string(),
                workdir: workdir.to_path_buf(),
                detail: outcome.brief_stderr().unwrap_or("no output").to_string(),
            });
        }

        let commit = outcome.stdout.trim().to_string();
        if commit.is_empty() {
            return Err(CollectError::RevisionResolution {
                revision: revision.to_string(),
                workdir: workdir.to_path_buf(),
                detail: "rev-list produced no commit".to_string(),
            });
        }

        Ok(commit)
    }
}

#[async_trait]
impl Tool for GitClient {
    fn name(&self) -> &str {
        "git"
    }

    async fn check_available(&self) -> CollectResult<bool> {
        Ok(self.git_bin.exists())
    }

    async fn version(&self) -> CollectResult<String> {
        let mut cmd = Command::new(&self.git_bin);
        cmd.arg("--version");
        let outcome = run_tool("git", &mut cmd).await?;
        Ok(first_line(&outcome.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_git_binary() {
        let err = GitClient::new(Path::new("/nonexistent/git-binary")).unwrap_err();
        assert!(matches!(err, CollectError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    mod with_stub {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn stub_git(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("git");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_resolve_revision_trims_stdout() {
            let dir = tempfile::tempdir().unwrap();
            let git = stub_git(dir.path(), "echo 'abc123def456  '");

            let client = GitClient::new(&git).unwrap();
            let commit = client.resolve_revision("v1.0", dir.path()).await.unwrap();
            assert_eq!(commit, "abc123def456");
        }

        #[tokio::test]
        async fn test_resolve_revision_nonzero_exit_is_error() {
            let dir = tempfile::tempdir().unwrap();
            let git = stub_git(dir.path(), "echo 'fatal: bad revision' >&2; exit 128");

            let client = GitClient::new(&git).unwrap();
            let err = client.resolve_revision("nope", dir.path()).await.unwrap_err();
            assert!(matches!(err, CollectError::RevisionResolution { .. }));
        }

        #[tokio::test]
        async fn test_resolve_revision_empty_output_is_error() {
            let dir = tempfile::tempdir().unwrap();
            let git = stub_git(dir.path(), "exit 0");

            let client = GitClient::new(&git).unwrap();
            let err = client.resolve_revision("v1.0", dir.path()).await.unwrap_err();
            assert!(matches!(err, CollectError::RevisionResolution { .. }));
        }

        #[tokio::test]
        async fn test_checkout_suppresses_detached_head_advice() {
            let dir = tempfile::tempdir().unwrap();
            let log = dir.path().join("argv.log");
            let git = stub_git(
                dir.path(),
                &format!("echo \"$@\" >> {}", log.display()),
            );

            let client = GitClient::new(&git).unwrap();
            client.checkout("v1.0", dir.path()).await.unwrap();

            let logged = std::fs::read_to_string(&log).unwrap();
            assert_eq!(
                logged.trim(),
                "-c advice.detachedHead=false checkout v1.0"
            );
        }
    }
}
