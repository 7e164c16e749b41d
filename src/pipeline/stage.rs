// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Stage and report types
//!
//! The pipeline is a fixed linear sequence of five stages per project. Three
//! of them are guarded by the existence of the artifact they produce, which
//! is the whole resume mechanism: the filesystem is the state machine's
//! memory.

use std::time::Duration;

use crate::registry::Project;

/// The five pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Clone the project's origin into the working copy
    Fetch,
    /// Check out the pinned revision
    Pin,
    /// Run the structural dependency extractor
    ExtractDeps,
    /// Dump full history into a fresh co-change store
    InitStore,
    /// Attach the dependency artifact to the resolved commit
    MergeDeps,
}

impl StageKind {
    /// Execution order
    pub const ALL: [StageKind; 5] = [
        StageKind::Fetch,
        StageKind::Pin,
        StageKind::ExtractDeps,
        StageKind::InitStore,
        StageKind::MergeDeps,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Fetch => "fetch",
            StageKind::Pin => "pin",
            StageKind::ExtractDeps => "extract-dependencies",
            StageKind::InitStore => "initialize-cochange-store",
            StageKind::MergeDeps => "merge-dependencies",
        }
    }

    /// Whether this stage has an existence guard (the unguarded stages run
    /// on every invocation)
    pub fn is_guarded(&self) -> bool {
        !matches!(self, StageKind::Pin | StageKind::MergeDeps)
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to one stage of one project
#[derive(Debug, Clone)]
pub enum StageOutcome {
    /// Stage ran and its tool reported success
    Completed,

    /// Guard was satisfied; nothing to do
    Skipped(String),

    /// Stage ran but did not succeed. `exit_code` is present for
    /// tool-reported failures and absent for launch/resolution failures.
    Failed {
        exit_code: Option<i32>,
        detail: String,
    },
}

impl StageOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StageOutcome::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped(_))
    }
}

/// Per-project record of stage outcomes, in execution order
#[derive(Debug)]
pub struct ProjectReport {
    pub project: Project,
    pub stages: Vec<(StageKind, StageOutcome)>,
}

impl ProjectReport {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            stages: Vec::with_capacity(StageKind::ALL.len()),
        }
    }

    pub fn record(&mut self, kind: StageKind, outcome: StageOutcome) {
        self.stages.push((kind, outcome));
    }

    pub fn outcome(&self, kind: StageKind) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, o)| o)
    }

    pub fn success(&self) -> bool {
        !self.stages.iter().any(|(_, o)| o.is_failed())
    }
}

/// Result of one full pipeline run
#[derive(Debug)]
pub struct RunReport {
    pub projects: Vec<ProjectReport>,
    pub duration: Duration,
}

impl RunReport {
    /// Whether every executed stage of every project succeeded
    pub fn success(&self) -> bool {
        self.projects.iter().all(ProjectReport::success)
    }

    pub fn failed_stage_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| p.stages.iter())
            .filter(|(_, o)| o.is_failed())
            .count()
    }
}
