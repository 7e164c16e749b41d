// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Stage runner
//!
//! Executes the five-stage pipeline for every project in registry order, one
//! project fully before the next. Guarded stages short-circuit on artifact
//! existence, so re-running after an interrupt resumes exactly where the
//! artifacts say the previous run stopped.
//!
//! A tool-reported failure is narrated and recorded but does not abort the
//! run: later stages may still be able to make progress, and other projects
//! are unaffected. `RunOptions::fail_fast` tightens this to "abort the rest
//! of this project, continue the run".

use colored::Colorize;
use std::time::Instant;

use crate::config::CollectConfig;
use crate::errors::{CollectError, CollectResult};
use crate::paths::Layout;
use crate::pipeline::{ProjectReport, RunReport, StageKind, StageOutcome};
use crate::registry::{Project, Registry};
use crate::tools::{CochangeTool, DependsExtractor, GitClient, Tool, ToolOutcome};
use crate::utils::create_spinner;

/// Pipeline execution options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Abort a project's remaining stages after the first failure
    pub fail_fast: bool,
    /// Only show what would be done
    pub dry_run: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Executes the pipeline stages for each registered project
pub struct StageRunner {
    layout: Layout,
    git: GitClient,
    extractor: DependsExtractor,
    cochange: CochangeTool,
    options: RunOptions,
}

impl StageRunner {
    /// Create a runner from configuration, resolving all tool binaries.
    ///
    /// A missing binary fails here, before any project is touched.
    pub fn new(config: &CollectConfig, options: RunOptions) -> CollectResult<Self> {
        Ok(Self {
            layout: Layout::from_config(config),
            git: GitClient::new(&config.git_bin)?,
            extractor: DependsExtractor::new(
                &config.java_bin,
                &config.extractor_jar,
                &config.extractor_heap,
                &config.extractor_language,
            )?,
            cochange: CochangeTool::new(&config.cochange_bin)?,
            options,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Check every external tool is invocable; returns the names that are not
    pub async fn preflight(&self) -> CollectResult<Vec<String>> {
        let tools: [&dyn Tool; 3] = [&self.git, &self.extractor, &self.cochange];

        let mut missing = Vec::new();
        for tool in tools {
            if !tool.check_available().await? {
                missing.push(tool.name().to_string());
            }
        }

        Ok(missing)
    }

    /// Run the pipeline over the whole registry
    pub async fn run(&self, registry: &Registry) -> CollectResult<RunReport> {
        let start = Instant::now();

        if self.options.dry_run {
            self.print_plan(registry);
            return Ok(RunReport {
                projects: Vec::new(),
                duration: start.elapsed(),
            });
        }

        let mut projects = Vec::new();
        for project in registry {
            projects.push(self.run_project(project).await);
        }

        let report = RunReport {
            projects,
            duration: start.elapsed(),
        };

        println!();
        if report.success() {
            println!(
                "{}",
                format!("Collection finished in {:.2}s", report.duration.as_secs_f64()).green()
            );
        } else {
            println!(
                "{}",
                format!(
                    "Collection finished with {} failed stage(s) in {:.2}s",
                    report.failed_stage_count(),
                    report.duration.as_secs_f64()
                )
                .red()
            );
        }

        Ok(report)
    }

    async fn run_project(&self, project: &Project) -> ProjectReport {
        println!();
        println!(
            "{}: {} {}",
            "Project".bold(),
            project.name.bold(),
            format!("@ {}", project.revision).dimmed()
        );

        let mut report = ProjectReport::new(project.clone());

        for kind in StageKind::ALL {
            let outcome = self.run_stage(kind, project).await;
            self.narrate(kind, &outcome);

            let failed = outcome.is_failed();
            report.record(kind, outcome);

            if failed && self.options.fail_fast {
                println!("  {}", "remaining stages aborted".dimmed());
                break;
            }
        }

        report
    }

    async fn run_stage(&self, kind: StageKind, project: &Project) -> StageOutcome {
        if let Some(reason) = self.guard_reason(kind, &project.name) {
            return StageOutcome::Skipped(reason);
        }

        let result = match kind {
            StageKind::Fetch => self.fetch(project).await,
            StageKind::Pin => self.pin(project).await,
            StageKind::ExtractDeps => self.extract_deps(project).await,
            StageKind::InitStore => self.init_store(project).await,
            StageKind::MergeDeps => self.merge_deps(project).await,
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(stage = kind.name(), project = %project.name, error = %e, "stage error");
                StageOutcome::Failed {
                    exit_code: None,
                    detail: e.to_string(),
                }
            }
        }
    }

    /// Evaluate a stage's existence guard; `Some(reason)` means skip
    fn guard_reason(&self, kind: StageKind, name: &str) -> Option<String> {
        match kind {
            StageKind::Fetch if self.layout.working_copy(name).exists() => {
                Some("already cloned".to_string())
            }
            StageKind::ExtractDeps if self.layout.dep_artifact(name).exists() => {
                Some("dependency artifact present".to_string())
            }
            StageKind::InitStore if self.layout.db(name).exists() => {
                Some("co-change store present".to_string())
            }
            _ => None,
        }
    }

    async fn fetch(&self, project: &Project) -> CollectResult<StageOutcome> {
        let dest = self.layout.working_copy(&project.name);
        self.ensure_root(self.layout.projects_root()).await?;

        let spinner = create_spinner(&format!("fetch: cloning {}", project.origin));
        let outcome = self.git.clone_repo(&project.origin, &dest).await;
        spinner.finish_and_clear();

        Ok(self.from_tool(outcome?))
    }

    async fn pin(&self, project: &Project) -> CollectResult<StageOutcome> {
        let workdir = self.layout.working_copy(&project.name);
        let outcome = self.git.checkout(&project.revision, &workdir).await?;
        Ok(self.from_tool(outcome))
    }

    async fn extract_deps(&self, project: &Project) -> CollectResult<StageOutcome> {
        let tree = self.layout.working_copy(&project.name);
        self.ensure_root(self.layout.deps_root()).await?;

        let spinner = create_spinner(&format!("extract-dependencies: analyzing {}", project.name));
        let outcome = self
            .extractor
            .extract(&tree, &project.name, self.layout.deps_root())
            .await;
        spinner.finish_and_clear();

        Ok(self.from_tool(outcome?))
    }

    async fn init_store(&self, project: &Project) -> CollectResult<StageOutcome> {
        let db = self.layout.db(&project.name);
        let repo = self.layout.working_copy(&project.name);
        self.ensure_root(self.layout.dbs_root()).await?;

        let spinner = create_spinner(&format!(
            "initialize-cochange-store: dumping history of {}",
            project.name
        ));
        let outcome = self.cochange.dump(&db, &repo, &project.revision).await;
        spinner.finish_and_clear();

        Ok(self.from_tool(outcome?))
    }

    async fn merge_deps(&self, project: &Project) -> CollectResult<StageOutcome> {
        let workdir = self.layout.working_copy(&project.name);
        let db = self.layout.db(&project.name);
        let artifact = self.layout.dep_artifact(&project.name);
        self.ensure_root(self.layout.dbs_root()).await?;

        // A commit id is required input to add-deps, so resolution failure
        // fails this stage outright.
        let commit = self.git.resolve_revision(&project.revision, &workdir).await?;
        tracing::debug!(project = %project.name, revision = %project.revision, %commit, "resolved revision");

        let spinner = create_spinner(&format!("merge-dependencies: attaching {}", project.name));
        let outcome = self.cochange.attach_deps(&db, &commit, &artifact).await;
        spinner.finish_and_clear();

        Ok(self.from_tool(outcome?))
    }

    async fn ensure_root(&self, root: &std::path::Path) -> CollectResult<()> {
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|e| CollectError::DirCreateError {
                path: root.to_path_buf(),
                error: e.to_string(),
            })
    }

    fn from_tool(&self, outcome: ToolOutcome) -> StageOutcome {
        if outcome.success() {
            return StageOutcome::Completed;
        }

        // Verbose runs keep the tool's whole stderr; otherwise one line is
        // enough for the narration.
        let detail = if self.options.verbose {
            match outcome.stderr.trim() {
                "" => "tool reported failure".to_string(),
                stderr => stderr.to_string(),
            }
        } else {
            outcome
                .brief_stderr()
                .unwrap_or("tool reported failure")
                .to_string()
        };

        StageOutcome::Failed {
            exit_code: Some(outcome.exit_code),
            detail,
        }
    }

    fn narrate(&self, kind: StageKind, outcome: &StageOutcome) {
        match outcome {
            StageOutcome::Completed => {
                println!("  {} {}", "✓".green(), kind);
            }
            StageOutcome::Skipped(reason) => {
                println!(
                    "  {} {} {}",
                    "○".dimmed(),
                    kind.to_string().dimmed(),
                    format!("({reason})").dimmed()
                );
            }
            StageOutcome::Failed { exit_code, detail } => {
                let suffix = match exit_code {
                    Some(code) => format!("(exit {code}) {detail}"),
                    None => detail.clone(),
                };
                println!("  {} {} {}", "✗".red(), kind, suffix.dimmed());
            }
        }
    }

    /// Print what a run would do, evaluating guards against current artifacts
    fn print_plan(&self, registry: &Registry) {
        println!();
        println!("{} ({} project(s)):", "Dry run".bold(), registry.len());

        for project in registry {
            println!();
            println!(
                "{}: {} {}",
                "Project".bold(),
                project.name.bold(),
                format!("@ {}", project.revision).dimmed()
            );

            for kind in StageKind::ALL {
                match self.guard_reason(kind, &project.name) {
                    Some(reason) => println!(
                        "  {} {} {}",
                        "○".dimmed(),
                        kind.to_string().dimmed(),
                        format!("(would skip: {reason})").dimmed()
                    ),
                    None => println!("  {} {} {}", "→".blue(), kind, "(would run)".dimmed()),
                }
            }
        }
    }
}
