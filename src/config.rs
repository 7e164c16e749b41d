// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Pipeline configuration
//!
//! All knobs the pipeline recognizes live in [`CollectConfig`]: the registry
//! location, the three artifact roots, and the external tool binaries. Every
//! field has a default, so an empty or absent `.cocollect.yaml` yields a
//! fully usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{CollectError, CollectResult};

/// Default configuration file name
pub const CONFIG_FILE: &str = ".cocollect.yaml";

/// Configuration for a collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Project registry CSV
    #[serde(default = "default_registry")]
    pub registry: PathBuf,

    /// Root directory for working copies
    #[serde(default = "default_projects_root")]
    pub projects_root: PathBuf,

    /// Root directory for dependency artifacts
    #[serde(default = "default_deps_root")]
    pub deps_root: PathBuf,

    /// Root directory for co-change stores
    #[serde(default = "default_dbs_root")]
    pub dbs_root: PathBuf,

    /// git binary
    #[serde(default = "default_git_bin")]
    pub git_bin: PathBuf,

    /// JVM binary used to run the extractor jar
    #[serde(default = "default_java_bin")]
    pub java_bin: PathBuf,

    /// Dependency extractor jar
    #[serde(default = "default_extractor_jar")]
    pub extractor_jar: PathBuf,

    /// JVM max heap for the extractor (passed as -Xmx)
    #[serde(default = "default_extractor_heap")]
    pub extractor_heap: String,

    /// Language the extractor analyzes
    #[serde(default = "default_extractor_language")]
    pub extractor_language: String,

    /// Co-change database tool binary
    #[serde(default = "default_cochange_bin")]
    pub cochange_bin: PathBuf,
}

fn default_registry() -> PathBuf {
    PathBuf::from("projects.csv")
}

fn default_projects_root() -> PathBuf {
    PathBuf::from("projects")
}

fn default_deps_root() -> PathBuf {
    PathBuf::from("deps")
}

fn default_dbs_root() -> PathBuf {
    PathBuf::from("dbs")
}

fn default_git_bin() -> PathBuf {
    PathBuf::from("git")
}

fn default_java_bin() -> PathBuf {
    PathBuf::from("java")
}

fn default_extractor_jar() -> PathBuf {
    PathBuf::from("depends.jar")
}

fn default_extractor_heap() -> String {
    "12G".to_string()
}

fn default_extractor_language() -> String {
    "java".to_string()
}

fn default_cochange_bin() -> PathBuf {
    PathBuf::from("cochange-tool")
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            projects_root: default_projects_root(),
            deps_root: default_deps_root(),
            dbs_root: default_dbs_root(),
            git_bin: default_git_bin(),
            java_bin: default_java_bin(),
            extractor_jar: default_extractor_jar(),
            extractor_heap: default_extractor_heap(),
            extractor_language: default_extractor_language(),
            cochange_bin: default_cochange_bin(),
        }
    }
}

impl CollectConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> CollectResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CollectError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> CollectResult<Self> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Load the configuration for a run.
    ///
    /// An explicit path must exist; otherwise `.cocollect.yaml` is read if
    /// present and defaults are used if not.
    pub fn load(explicit: Option<&Path>) -> CollectResult<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CollectError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_file(path)
            }
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CollectConfig::default();
        assert_eq!(config.registry, PathBuf::from("projects.csv"));
        assert_eq!(config.projects_root, PathBuf::from("projects"));
        assert_eq!(config.deps_root, PathBuf::from("deps"));
        assert_eq!(config.dbs_root, PathBuf::from("dbs"));
        assert_eq!(config.extractor_heap, "12G");
        assert_eq!(config.extractor_language, "java");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = CollectConfig::from_yaml("projects_root: /data/checkouts\nextractor_heap: 4G")
            .unwrap();
        assert_eq!(config.projects_root, PathBuf::from("/data/checkouts"));
        assert_eq!(config.extractor_heap, "4G");
        assert_eq!(config.dbs_root, PathBuf::from("dbs"));
        assert_eq!(config.git_bin, PathBuf::from("git"));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let err = CollectConfig::load(Some(Path::new("/nonexistent/cocollect.yaml"))).unwrap_err();
        assert!(matches!(err, CollectError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.yaml");
        std::fs::write(&path, "cochange_bin: /opt/bin/cochange-tool").unwrap();

        let config = CollectConfig::load(Some(&path)).unwrap();
        assert_eq!(config.cochange_bin, PathBuf::from("/opt/bin/cochange-tool"));
        assert_eq!(config.registry, PathBuf::from("projects.csv"));
    }
}
