// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Artifact path derivation
//!
//! Every artifact the pipeline produces is addressed purely by project name
//! under one of three fixed roots. The revision never participates in the
//! path: idempotence is by name, so re-running with a different pinned
//! revision reuses the same working copy, artifact, and store.
//!
//! Names are interpolated verbatim. A name containing path separators or
//! `..` will escape its root; `cocollect validate` flags such names but the
//! pipeline does not reject them.

use std::path::{Path, PathBuf};

use crate::config::CollectConfig;

/// Suffix the extractor appends to its output stem
const DEP_ARTIFACT_SUFFIX: &str = "-deps-structure.json";

/// On-disk layout for one collection run
#[derive(Debug, Clone)]
pub struct Layout {
    projects_root: PathBuf,
    deps_root: PathBuf,
    dbs_root: PathBuf,
}

impl Layout {
    pub fn new(projects_root: PathBuf, deps_root: PathBuf, dbs_root: PathBuf) -> Self {
        Self {
            projects_root,
            deps_root,
            dbs_root,
        }
    }

    pub fn from_config(config: &CollectConfig) -> Self {
        Self::new(
            config.projects_root.clone(),
            config.deps_root.clone(),
            config.dbs_root.clone(),
        )
    }

    /// `<projects_root>/<name>`
    pub fn working_copy(&self, name: &str) -> PathBuf {
        self.projects_root.join(name)
    }

    /// `<deps_root>/<name>-deps-structure.json`
    pub fn dep_artifact(&self, name: &str) -> PathBuf {
        self.deps_root.join(format!("{name}{DEP_ARTIFACT_SUFFIX}"))
    }

    /// `<dbs_root>/<name>.db`
    pub fn db(&self, name: &str) -> PathBuf {
        self.dbs_root.join(format!("{name}.db"))
    }

    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    pub fn deps_root(&self) -> &Path {
        &self.deps_root
    }

    pub fn dbs_root(&self) -> &Path {
        &self.dbs_root
    }
}

/// True if a project name would resolve outside its root directory
pub fn name_escapes_root(name: &str) -> bool {
    name.is_empty()
        || Path::new(name)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        || Path::new(name).components().count() != 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(
            PathBuf::from("projects"),
            PathBuf::from("deps"),
            PathBuf::from("dbs"),
        )
    }

    #[test]
    fn test_path_shapes() {
        let layout = layout();
        assert_eq!(layout.working_copy("acme"), PathBuf::from("projects/acme"));
        assert_eq!(
            layout.dep_artifact("acme"),
            PathBuf::from("deps/acme-deps-structure.json")
        );
        assert_eq!(layout.db("acme"), PathBuf::from("dbs/acme.db"));
    }

    #[test]
    fn test_paths_are_deterministic() {
        let layout = layout();
        assert_eq!(layout.working_copy("acme"), layout.working_copy("acme"));
        assert_eq!(layout.dep_artifact("acme"), layout.dep_artifact("acme"));
        assert_eq!(layout.db("acme"), layout.db("acme"));
    }

    #[test]
    fn test_paths_ignore_revision_by_construction() {
        // Same name, different revisions: the layout has no revision input,
        // so both rows of a duplicate-name registry share all three paths.
        let layout = layout();
        let a = layout.dep_artifact("acme");
        let b = layout.dep_artifact("acme");
        assert_eq!(a, b);
    }

    #[test]
    fn test_name_escape_detection() {
        assert!(!name_escapes_root("acme"));
        assert!(!name_escapes_root("acme-2.0"));
        assert!(name_escapes_root(""));
        assert!(name_escapes_root("../etc"));
        assert!(name_escapes_root("a/b"));
        assert!(name_escapes_root(".."));
    }
}
