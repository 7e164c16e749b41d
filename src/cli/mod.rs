// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for cocollect.

pub mod run;
pub mod status;
pub mod validate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Co-change data collection pipeline
///
/// Clone registered projects at pinned revisions, extract structural
/// dependency graphs, and merge them with change history into per-project
/// co-change databases.
#[derive(Parser, Debug)]
#[clap(
    name = "cocollect",
    version,
    about = "Batch collection pipeline for structural-dependency and co-change data",
    long_about = None,
    after_help = "Examples:\n\
        cocollect run                   Collect all registered projects\n\
        cocollect run --dry-run         Show what a run would do\n\
        cocollect status                Show which artifacts exist per project\n\
        cocollect validate              Check registry and external tools\n\n\
        See 'cocollect <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the collection pipeline over the registry
    Run {
        /// Configuration file (default: .cocollect.yaml if present)
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Project registry CSV (overrides configuration)
        #[clap(short, long)]
        registry: Option<PathBuf>,

        /// Restrict the run to these project names (repeatable)
        #[clap(short, long = "project", value_name = "NAME")]
        projects: Vec<String>,

        /// Abort a project's remaining stages after the first failure
        #[clap(long)]
        fail_fast: bool,

        /// Dry run (show which stages would run or be skipped)
        #[clap(long)]
        dry_run: bool,
    },

    /// Show per-project artifact state without running anything
    Status {
        /// Configuration file (default: .cocollect.yaml if present)
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Project registry CSV (overrides configuration)
        #[clap(short, long)]
        registry: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the registry and check external tools
    Validate {
        /// Configuration file (default: .cocollect.yaml if present)
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Project registry CSV (overrides configuration)
        #[clap(short, long)]
        registry: Option<PathBuf>,
    },
}

/// Output format for the status command
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
