// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Run command - execute the collection pipeline

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::config::CollectConfig;
use crate::pipeline::{RunOptions, StageRunner};
use crate::registry::Registry;

/// Run the pipeline
pub async fn run(
    config_path: Option<PathBuf>,
    registry_path: Option<PathBuf>,
    projects: Vec<String>,
    fail_fast: bool,
    dry_run: bool,
    verbose: bool,
) -> Result<()> {
    let config = CollectConfig::load(config_path.as_deref())?;

    let registry_path = registry_path.unwrap_or_else(|| config.registry.clone());
    let registry = Registry::load(&registry_path)?;

    if registry.is_empty() {
        println!("{}", "Registry is empty; nothing to collect.".yellow());
        return Ok(());
    }

    // Tool binaries resolve here, before any project is touched
    let options = RunOptions {
        fail_fast,
        dry_run,
        verbose,
    };
    let runner = StageRunner::new(&config, options)?;

    let missing_tools = runner.preflight().await?;
    if !missing_tools.is_empty() {
        eprintln!("{}", "Missing required tools:".red().bold());
        for tool in &missing_tools {
            eprintln!("  {} {}", "✗".red(), tool);
            if tool == "extractor" {
                eprintln!(
                    "    Place the extractor jar at {} or set 'extractor_jar'",
                    config.extractor_jar.display().to_string().cyan()
                );
            }
        }
        return Err(miette::miette!("Required tools are not installed"));
    }

    let registry = filter_registry(registry, &projects)?;

    println!(
        "{}: {} project(s) from {}",
        "Registry".bold(),
        registry.len(),
        registry_path.display()
    );

    let report = runner.run(&registry).await?;

    if !report.success() {
        for project_report in &report.projects {
            for (kind, outcome) in &project_report.stages {
                if outcome.is_failed() {
                    eprintln!(
                        "{}",
                        format!("  {} / {} failed", project_report.project.name, kind).red()
                    );
                }
            }
        }
        return Err(miette::miette!(
            "{} stage(s) failed; artifacts from completed stages are kept, re-run to resume",
            report.failed_stage_count()
        ));
    }

    Ok(())
}

/// Restrict the registry to the requested names, keeping registry order
fn filter_registry(registry: Registry, names: &[String]) -> Result<Registry> {
    if names.is_empty() {
        return Ok(registry);
    }

    for name in names {
        if !registry.projects().iter().any(|p| &p.name == name) {
            return Err(miette::miette!("Project '{}' is not in the registry", name));
        }
    }

    let selected = registry
        .projects()
        .iter()
        .filter(|p| names.contains(&p.name))
        .cloned()
        .collect();

    Ok(Registry::from_projects(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Project;

    fn project(name: &str) -> Project {
        Project {
            name: name.to_string(),
            origin: format!("https://example.test/{name}.git"),
            revision: "main".to_string(),
        }
    }

    #[test]
    fn test_filter_keeps_order_and_duplicates() {
        let registry = Registry::from_projects(vec![
            project("acme"),
            project("widget"),
            project("acme"),
        ]);

        let filtered = filter_registry(registry, &["acme".to_string()]).unwrap();
        let names: Vec<_> = filtered.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["acme", "acme"]);
    }

    #[test]
    fn test_filter_unknown_name_fails() {
        let registry = Registry::from_projects(vec![project("acme")]);
        assert!(filter_registry(registry, &["ghost".to_string()]).is_err());
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let registry = Registry::from_projects(vec![project("acme"), project("widget")]);
        let filtered = filter_registry(registry, &[]).unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
