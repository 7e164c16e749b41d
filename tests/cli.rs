// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 cocollect contributors

//! Binary-level smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

fn cocollect() -> Command {
    Command::cargo_bin("cocollect").unwrap()
}

#[test]
fn help_lists_commands() {
    cocollect()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn run_without_registry_fails() {
    let dir = tempfile::tempdir().unwrap();

    cocollect()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry not found"));
}

#[test]
fn validate_without_registry_fails() {
    let dir = tempfile::tempdir().unwrap();

    cocollect()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Setup validation failed"));
}

#[test]
fn status_reports_missing_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("projects.csv"),
        "acme,https://example.test/acme.git,v1.0\n",
    )
    .unwrap();

    cocollect()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("acme"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn status_json_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("projects.csv"),
        "acme,https://example.test/acme.git,v1.0\n",
    )
    .unwrap();

    let output = cocollect()
        .current_dir(dir.path())
        .args(["status", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["name"], "acme");
    assert_eq!(parsed[0]["revision"], "v1.0");
    assert_eq!(parsed[0]["cloned"], false);
    assert_eq!(parsed[0]["store_initialized"], false);
}

#[test]
fn malformed_registry_row_aborts_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("projects.csv"),
        "acme,https://example.test/acme.git\n",
    )
    .unwrap();

    cocollect()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed registry row"));
}

#[cfg(unix)]
#[test]
fn dry_run_with_stub_tools_touches_nothing() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();

    for name in ["git", "java", "cochange-tool"] {
        let path = bin.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    std::fs::write(dir.path().join("depends.jar"), b"jar").unwrap();

    std::fs::write(
        dir.path().join(".cocollect.yaml"),
        format!(
            "git_bin: {bin}/git\njava_bin: {bin}/java\ncochange_bin: {bin}/cochange-tool\n",
            bin = bin.display()
        ),
    )
    .unwrap();

    std::fs::write(
        dir.path().join("projects.csv"),
        "acme,https://example.test/acme.git,v1.0\n",
    )
    .unwrap();

    cocollect()
        .current_dir(dir.path())
        .args(["run", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would run"));

    assert!(!dir.path().join("projects/acme").exists());
    assert!(!dir.path().join("deps").exists());
    assert!(!dir.path().join("dbs").exists());
}
