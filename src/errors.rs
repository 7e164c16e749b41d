// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Error types
//!
//! All fallible operations in cocollect surface a [`CollectError`], which
//! carries a miette diagnostic code and, where it helps, a suggestion for
//! fixing the problem.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for cocollect operations
pub type CollectResult<T> = Result<T, CollectError>;

/// Main error type for cocollect
#[derive(Error, Debug, Diagnostic)]
pub enum CollectError {
    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Config file not found: {path}")]
    #[diagnostic(code(cocollect::config_not_found))]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────────
    // Registry Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Project registry not found: {path}")]
    #[diagnostic(
        code(cocollect::registry_not_found),
        help("Create a CSV file with one 'name,origin,revision' row per project")
    )]
    RegistryNotFound { path: PathBuf },

    #[error("Malformed registry row at line {line}: expected 3 fields, found {found}")]
    #[diagnostic(
        code(cocollect::malformed_row),
        help("Every row must be 'name,origin,revision'")
    )]
    MalformedRow { line: usize, found: usize },

    #[error("Failed to read registry: {message}")]
    #[diagnostic(code(cocollect::registry_read_error))]
    RegistryRead { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Tool Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Tool '{tool}' not found")]
    #[diagnostic(code(cocollect::tool_not_found), help("{suggestion}"))]
    ToolNotFound { tool: String, suggestion: String },

    #[error("Failed to launch '{tool}': {error}")]
    #[diagnostic(code(cocollect::tool_launch_failed))]
    ToolLaunch {
        tool: String,
        error: String,
        #[help]
        help: Option<String>,
    },

    #[error("Could not resolve revision '{revision}' in {workdir}")]
    #[diagnostic(
        code(cocollect::revision_resolution_failed),
        help("Check that the revision exists in the cloned history: {detail}")
    )]
    RevisionResolution {
        revision: String,
        workdir: PathBuf,
        detail: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(cocollect::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to create directory '{path}': {error}")]
    #[diagnostic(code(cocollect::dir_create_error))]
    DirCreateError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/Parsing Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(cocollect::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(cocollect::yaml_error))]
    Yaml { message: String },

    #[error("CSV parsing error: {message}")]
    #[diagnostic(code(cocollect::csv_error))]
    Csv { message: String },
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for CollectError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<csv::Error> for CollectError {
    fn from(e: csv::Error) -> Self {
        Self::Csv { message: e.to_string() }
    }
}

impl CollectError {
    /// Create a tool not found error with an installation suggestion
    pub fn tool_not_found(tool: &str) -> Self {
        let suggestion = match tool {
            "git" => "Install git: https://git-scm.com/downloads".to_string(),
            "java" => "Install a JRE (the dependency extractor runs on the JVM)".to_string(),
            "cochange-tool" => {
                "Build cochange-tool and place it on your PATH, or point 'cochange_bin' at it"
                    .to_string()
            }
            _ => format!("Install {} and ensure it's in your PATH", tool),
        };

        Self::ToolNotFound {
            tool: tool.to_string(),
            suggestion,
        }
    }
}
