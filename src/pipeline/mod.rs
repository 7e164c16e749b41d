// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Pipeline stages and runner
//!
//! The fixed five-stage collection state machine and its per-project
//! execution reports.

mod runner;
mod stage;

pub use runner::{RunOptions, StageRunner};
pub use stage::{ProjectReport, RunReport, StageKind, StageOutcome};
