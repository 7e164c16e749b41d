// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Validate command - check registry and external tool setup

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::config::CollectConfig;
use crate::paths::name_escapes_root;
use crate::registry::Registry;
use crate::tools::{CochangeTool, DependsExtractor, GitClient, Tool};

/// Run the validate command
pub async fn run(
    config_path: Option<PathBuf>,
    registry_path: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    println!("{}", "Validating setup...".bold());
    println!();

    let config = CollectConfig::load(config_path.as_deref())?;
    let registry_path = registry_path.unwrap_or_else(|| config.registry.clone());

    let mut has_errors = false;
    let mut has_warnings = false;

    // Registry
    match Registry::load(&registry_path) {
        Ok(registry) => {
            println!(
                "  {} Registry parses: {} project(s) in {}",
                "✓".green(),
                registry.len(),
                registry_path.display()
            );

            let duplicates = registry.duplicate_names();
            if !duplicates.is_empty() {
                has_warnings = true;
                println!(
                    "  {} Duplicate project names (later rows reuse earlier artifacts): {}",
                    "⚠".yellow(),
                    duplicates.join(", ")
                );
            }

            for project in &registry {
                if name_escapes_root(&project.name) {
                    has_warnings = true;
                    println!(
                        "  {} Project name '{}' escapes the artifact roots",
                        "⚠".yellow(),
                        project.name
                    );
                }
            }
        }
        Err(e) => {
            has_errors = true;
            println!("  {} Registry: {}", "✗".red(), e);
        }
    }

    // Tools
    println!();
    println!("{}:", "External tools".bold());

    match GitClient::new(&config.git_bin) {
        Ok(git) => report_tool(&git, verbose).await,
        Err(e) => {
            has_errors = true;
            println!("  {} git: {}", "✗".red(), e);
        }
    }

    match DependsExtractor::new(
        &config.java_bin,
        &config.extractor_jar,
        &config.extractor_heap,
        &config.extractor_language,
    ) {
        Ok(extractor) => {
            if extractor.check_available().await.unwrap_or(false) {
                report_tool(&extractor, verbose).await;
            } else {
                has_errors = true;
                println!(
                    "  {} extractor: jar not found at {}",
                    "✗".red(),
                    extractor.jar().display()
                );
            }
        }
        Err(e) => {
            has_errors = true;
            println!("  {} extractor: {}", "✗".red(), e);
        }
    }

    match CochangeTool::new(&config.cochange_bin) {
        Ok(cochange) => report_tool(&cochange, verbose).await,
        Err(e) => {
            has_errors = true;
            println!("  {} cochange-tool: {}", "✗".red(), e);
        }
    }

    println!();

    if has_errors {
        Err(miette::miette!("Setup validation failed"))
    } else if has_warnings {
        println!("{}", "Setup is valid but has warnings.".yellow().bold());
        Ok(())
    } else {
        println!("{}", "Setup is valid!".green().bold());
        Ok(())
    }
}

async fn report_tool(tool: &dyn Tool, verbose: bool) {
    if verbose {
        match tool.version().await {
            Ok(version) => println!("  {} {} ({})", "✓".green(), tool.name(), version.dimmed()),
            Err(_) => println!("  {} {}", "✓".green(), tool.name()),
        }
    } else {
        println!("  {} {}", "✓".green(), tool.name());
    }
}
