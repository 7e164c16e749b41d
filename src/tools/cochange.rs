// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Co-change tool adapter
//!
//! The co-change store is entirely owned by the external tool; cocollect only
//! addresses it. `dump` initializes a store from a repository's full history,
//! `add-deps` attaches a dependency artifact to one commit inside it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::{first_line, run_tool, Tool, ToolOutcome};
use crate::errors::{CollectError, CollectResult};

/// Co-change database tool adapter
pub struct CochangeTool {
    bin: PathBuf,
}

impl CochangeTool {
    pub fn new(bin: &Path) -> CollectResult<Self> {
        let bin = which::which(bin).map_err(|_| CollectError::tool_not_found("cochange-tool"))?;
        Ok(Self { bin })
    }

    /// `cochange-tool dump --all --db <db> --repo <repo> <revision>`
    pub async fn dump(
        &self,
        db: &Path,
        repo: &Path,
        revision: &str,
    ) -> CollectResult<ToolOutcome> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("dump")
            .arg("--all")
            .arg("--db")
            .arg(db)
            .arg("--repo")
            .arg(repo)
            .arg(revision);
        run_tool("cochange-tool", &mut cmd).await
    }

    /// `cochange-tool add-deps --db <db> --commit <commit> --dep-file <artifact>`
    pub async fn attach_deps(
        &self,
        db: &Path,
        commit: &str,
        dep_file: &Path,
    ) -> CollectResult<ToolOutcome> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("add-deps")
            .arg("--db")
            .arg(db)
            .arg("--commit")
            .arg(commit)
            .arg("--dep-file")
            .arg(dep_file);
        run_tool("cochange-tool", &mut cmd).await
    }
}

#[async_trait]
impl Tool for CochangeTool {
    fn name(&self) -> &str {
        "cochange-tool"
    }

    async fn check_available(&self) -> CollectResult<bool> {
        Ok(self.bin.exists())
    }

    async fn version(&self) -> CollectResult<String> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("--version");
        let outcome = run_tool("cochange-tool", &mut cmd).await?;
        Ok(first_line(&outcome.stdout))
    }
}
