// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! cocollect - Co-change Data Collection Pipeline
//!
//! Batch driver: clone, pin, extract dependencies, and build co-change
//! databases for every registered project.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cocollect::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cocollect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Run {
            config,
            registry,
            projects,
            fail_fast,
            dry_run,
        } => {
            cocollect::cli::run::run(config, registry, projects, fail_fast, dry_run, cli.verbose)
                .await
        }
        Commands::Status {
            config,
            registry,
            format,
        } => cocollect::cli::status::run(config, registry, format, cli.verbose).await,
        Commands::Validate { config, registry } => {
            cocollect::cli::validate::run(config, registry, cli.verbose).await
        }
    }
}
