// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Project registry
//!
//! The registry is a headerless CSV file with one `name,origin,revision` row
//! per project. Row order is preserved verbatim, including duplicate names —
//! the pipeline processes projects exactly in file order, which is what makes
//! interrupted runs resumable in a predictable place.

use serde::Serialize;
use std::path::Path;

use crate::errors::{CollectError, CollectResult};

/// One unit of collection work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// Project name; identity for all derived artifact paths
    pub name: String,

    /// Clone source (URL or local path)
    pub origin: String,

    /// Revision to pin the working copy to (tag, branch, or commit id)
    pub revision: String,
}

/// Ordered list of project descriptors
#[derive(Debug, Clone, Default)]
pub struct Registry {
    projects: Vec<Project>,
}

impl Registry {
    /// Build a registry from an already-ordered list of projects
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Load the registry from a CSV file.
    ///
    /// Rows with fewer than three fields are a fatal error; columns beyond
    /// the third are ignored.
    pub fn load(path: &Path) -> CollectResult<Self> {
        if !path.exists() {
            return Err(CollectError::RegistryNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| CollectError::RegistryRead {
                message: e.to_string(),
            })?;

        let mut projects = Vec::new();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() < 3 {
                // Physical file line, so blank lines and multi-line quoted
                // fields don't skew the diagnostic
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(idx + 1);
                return Err(CollectError::MalformedRow {
                    line,
                    found: record.len(),
                });
            }

            projects.push(Project {
                name: record[0].to_string(),
                origin: record[1].to_string(),
                revision: record[2].to_string(),
            });
        }

        Ok(Self { projects })
    }

    /// Projects in registry order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Names that appear more than once, in first-seen order
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for project in &self.projects {
            if !seen.insert(project.name.as_str()) && !dups.contains(&project.name.as_str()) {
                dups.push(project.name.as_str());
            }
        }
        dups
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_registry(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_preserves_order_and_duplicates() {
        let (_dir, path) = write_registry(
            "acme,https://example.test/acme.git,v1.0\n\
             widget,https://example.test/widget.git,main\n\
             acme,https://example.test/acme.git,v2.0\n",
        );

        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.len(), 3);

        let names: Vec<_> = registry.projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["acme", "widget", "acme"]);
        assert_eq!(registry.projects()[0].revision, "v1.0");
        assert_eq!(registry.projects()[2].revision, "v2.0");
        assert_eq!(registry.duplicate_names(), vec!["acme"]);
    }

    #[test]
    fn test_load_quoted_fields() {
        let (_dir, path) = write_registry("\"acme\",\"https://example.test/a,b.git\",\"v1.0\"\n");

        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.projects()[0].origin, "https://example.test/a,b.git");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let (_dir, path) = write_registry("acme,https://example.test/acme.git,v1.0,unused\n");

        let registry = Registry::load(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.projects()[0].revision, "v1.0");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let (_dir, path) = write_registry(
            "acme,https://example.test/acme.git,v1.0\n\
             widget,https://example.test/widget.git\n",
        );

        let err = Registry::load(&path).unwrap_err();
        match err {
            CollectError::MalformedRow { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_row_reports_physical_line() {
        // A quoted field spanning two physical lines pushes the bad row to
        // line 3 even though it is the second record.
        let (_dir, path) = write_registry(
            "acme,\"https://example.test/\nacme.git\",v1.0\n\
             widget,https://example.test/widget.git\n",
        );

        let err = Registry::load(&path).unwrap_err();
        match err {
            CollectError::MalformedRow { line, found } => {
                assert_eq!(line, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Registry::load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, CollectError::RegistryNotFound { .. }));
    }

    #[test]
    fn test_empty_file_is_empty_registry() {
        let (_dir, path) = write_registry("");
        let registry = Registry::load(&path).unwrap();
        assert!(registry.is_empty());
    }
}
