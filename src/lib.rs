// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! # cocollect - Co-change Data Collection Pipeline
//!
//! `cocollect` drives a batch collection run over a registry of projects:
//! clone each one at a pinned revision, extract its structural dependency
//! graph with an external analyzer, and merge graph plus change history into
//! a per-project co-change database.
//!
//! ## Design
//!
//! - **Idempotent stages** - fetch, extraction, and store initialization are
//!   guarded by the existence of the artifact they produce
//! - **Resumable** - re-running after an interrupt resumes where the
//!   artifacts say the previous run stopped; no journal, no in-memory ledger
//! - **Inspectable** - pipeline progress is readable from the filesystem
//!   (`cocollect status` is just that, formatted)
//!
//! ## Quick Start
//!
//! ```bash
//! # Check registry and tools
//! cocollect validate
//!
//! # Collect everything
//! cocollect run
//!
//! # See what a run would do
//! cocollect run --dry-run
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod paths;
pub mod pipeline;
pub mod registry;
pub mod tools;
pub mod utils;

// Re-export commonly used types
pub use config::CollectConfig;
pub use errors::{CollectError, CollectResult};
pub use paths::Layout;
pub use pipeline::{RunOptions, RunReport, StageKind, StageRunner};
pub use registry::{Project, Registry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
