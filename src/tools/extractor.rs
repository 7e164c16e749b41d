// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Dependency extractor adapter
//!
//! The structural dependency extractor ships as a jar and is run through the
//! JVM from inside the working copy. The flag set is fixed: file-level
//! structural granularity, Unix-style path naming, self-dependencies
//! included, and the working copy's absolute root stripped from emitted
//! identifiers. Given output stem `<name>-deps` it writes
//! `<name>-deps-structure.json` into the output directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::{first_line, run_tool, Tool, ToolOutcome};
use crate::errors::{CollectError, CollectResult};

/// JVM-hosted structural dependency extractor
pub struct DependsExtractor {
    java_bin: PathBuf,
    jar: PathBuf,
    heap: String,
    language: String,
}

impl DependsExtractor {
    pub fn new(
        java_bin: &Path,
        jar: &Path,
        heap: &str,
        language: &str,
    ) -> CollectResult<Self> {
        let java_bin = which::which(java_bin).map_err(|_| CollectError::tool_not_found("java"))?;

        Ok(Self {
            java_bin,
            jar: jar.to_path_buf(),
            heap: heap.to_string(),
            language: language.to_string(),
        })
    }

    /// Run the extractor against a working copy.
    ///
    /// The subprocess runs with the tree as its cwd, so the jar and output
    /// directory are absolutized first.
    pub async fn extract(
        &self,
        tree: &Path,
        name: &str,
        out_dir: &Path,
    ) -> CollectResult<ToolOutcome> {
        let jar = std::path::absolute(&self.jar)?;
        let out_dir = std::path::absolute(out_dir)?;

        let mut cmd = Command::new(&self.java_bin);
        cmd.arg(format!("-Xmx{}", self.heap))
            .arg("-jar")
            .arg(&jar)
            .arg(&self.language)
            .arg(".")
            .arg(format!("{name}-deps"))
            .arg(format!("--dir={}", out_dir.display()))
            .arg("--detail")
            .arg("--output-self-deps")
            .arg("--granularity=structure")
            .arg("--namepattern=unix")
            .arg("--strip-leading-path");
        cmd.current_dir(tree);

        run_tool("extractor", &mut cmd).await
    }

    pub fn jar(&self) -> &Path {
        &self.jar
    }
}

#[async_trait]
impl Tool for DependsExtractor {
    fn name(&self) -> &str {
        "extractor"
    }

    async fn check_available(&self) -> CollectResult<bool> {
        Ok(self.java_bin.exists() && self.jar.exists())
    }

    async fn version(&self) -> CollectResult<String> {
        // The JVM prints its banner on stderr
        let mut cmd = Command::new(&self.java_bin);
        cmd.arg("-version");
        let outcome = run_tool("java", &mut cmd).await?;
        Ok(first_line(&outcome.stderr))
    }
}
