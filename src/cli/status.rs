// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Status command - report per-project artifact state
//!
//! Pipeline progress is fully externally inspectable: each stage's completion
//! is its artifact's existence. This command is that inspection, formatted.

use colored::Colorize;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::CollectConfig;
use crate::paths::Layout;
use crate::registry::Registry;

/// Artifact state for one registry row
#[derive(Debug, Serialize)]
struct ProjectStatus {
    name: String,
    revision: String,
    cloned: bool,
    extracted: bool,
    store_initialized: bool,
}

/// Run the status command
pub async fn run(
    config_path: Option<PathBuf>,
    registry_path: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let config = CollectConfig::load(config_path.as_deref())?;
    let registry_path = registry_path.unwrap_or_else(|| config.registry.clone());
    let registry = Registry::load(&registry_path)?;
    let layout = Layout::from_config(&config);

    let statuses: Vec<ProjectStatus> = registry
        .projects()
        .iter()
        .map(|p| ProjectStatus {
            name: p.name.clone(),
            revision: p.revision.clone(),
            cloned: layout.working_copy(&p.name).exists(),
            extracted: layout.dep_artifact(&p.name).exists(),
            store_initialized: layout.db(&p.name).exists(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&statuses)
                    .map_err(|e| miette::miette!("Failed to serialize status: {}", e))?
            );
        }
        OutputFormat::Text => {
            print_text(&statuses, &layout, verbose);
        }
    }

    Ok(())
}

fn print_text(statuses: &[ProjectStatus], layout: &Layout, verbose: bool) {
    if statuses.is_empty() {
        println!("{}", "Registry is empty.".yellow());
        return;
    }

    println!("{} ({} project(s)):", "Collection status".bold(), statuses.len());
    println!();

    for status in statuses {
        let complete = status.cloned && status.extracted && status.store_initialized;
        let header = if complete {
            format!("{} {}", "✓".green(), status.name.bold())
        } else {
            format!("{} {}", "…".yellow(), status.name.bold())
        };
        println!("  {} {}", header, format!("@ {}", status.revision).dimmed());

        print_artifact("working copy", status.cloned);
        print_artifact("dependency artifact", status.extracted);
        print_artifact("co-change store", status.store_initialized);

        if verbose {
            println!(
                "      {}",
                layout.working_copy(&status.name).display().to_string().dimmed()
            );
            println!(
                "      {}",
                layout.dep_artifact(&status.name).display().to_string().dimmed()
            );
            println!("      {}", layout.db(&status.name).display().to_string().dimmed());
        }
    }
}

fn print_artifact(label: &str, exists: bool) {
    if exists {
        println!("    {} {}", "✓".green(), label);
    } else {
        println!("    {} {}", "✗".red(), format!("{label} (missing)").dimmed());
    }
}
