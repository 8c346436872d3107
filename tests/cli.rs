use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

mod common;

use common::{make_home, make_skill};

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_robot_mode_global() {
    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.args(["--robot", "--help"]).assert().success();
}

#[cfg(unix)]
#[test]
fn test_link_distributes_to_installed_tools() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    let source = root.join("dist/skills");
    make_skill(&source, "brp-react");
    make_skill(&source, "brp-rust");
    let home = make_home(dir.path(), &[".cursor", ".gemini"]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done: 2 skills"))
        .stdout(predicate::str::contains("cursor"))
        .stdout(predicate::str::contains("skipped"));

    // canonical entries are symlinks into the source tree
    let canonical = home.join(".agents/skills");
    assert_eq!(
        std::fs::read_link(canonical.join("brp-react")).unwrap(),
        source.join("brp-react")
    );

    // symlink target entries point into canonical
    assert_eq!(
        std::fs::read_link(home.join(".cursor/skills/brp-rust")).unwrap(),
        canonical.join("brp-rust")
    );

    // copy target gets a real directory
    let copied = home.join(".gemini/antigravity/skills/brp-react");
    let meta = std::fs::symlink_metadata(&copied).unwrap();
    assert!(meta.is_dir() && !meta.file_type().is_symlink());
    assert!(copied.join("SKILL.md").exists());
}

#[cfg(unix)]
#[test]
fn test_link_robot_output_shape() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    make_skill(&root.join("dist/skills"), "brp-one");
    let home = make_home(dir.path(), &[".cursor"]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    let output = cmd
        .env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .args(["--robot", "link"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], Value::String("ok".to_string()));
    assert_eq!(json["data"]["distributed"], Value::from(1));
    assert_eq!(json["data"]["skills"][0], Value::from("brp-one"));
}

#[test]
fn test_link_with_empty_source_reports_nothing_to_do() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    std::fs::create_dir_all(root.join("dist/skills")).unwrap();
    let home = make_home(dir.path(), &[".cursor"]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::contains("No skills found"));
}

#[test]
fn test_targets_lists_registry() {
    let dir = tempdir().unwrap();
    let home = make_home(dir.path(), &[".cursor"]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    let output = cmd
        .env("SF_ROOT", dir.path())
        .env("SF_HOME", &home)
        .args(["--robot", "targets"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["data"].as_array().unwrap();
    assert!(entries.len() >= 14);
    let cursor = entries
        .iter()
        .find(|entry| entry["id"] == "cursor")
        .unwrap();
    assert_eq!(cursor["installed"], Value::Bool(true));
    assert_eq!(cursor["strategy"], Value::String("symlink".to_string()));
}

#[test]
fn test_check_version_mismatch_fails() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    make_skill(&root.join("skills"), "brp-a"); // metadata.version = 1.0.0
    let home = make_home(dir.path(), &[]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .args(["check-version", "--expected", "2.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("metadata.version = 1.0.0"));
}

#[test]
fn test_check_version_ok() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    make_skill(&root.join("skills"), "brp-a");
    let home = make_home(dir.path(), &[]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .args(["check-version", "--expected", "1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version check OK: 1.0.0"));
}

#[test]
fn test_catalog_writes_llms_txt() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    make_skill(&root.join("skills"), "brp-react");
    make_skill(&root.join("skills"), "brp-rust");
    let home = make_home(dir.path(), &[]);

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 skills"));

    let text = std::fs::read_to_string(root.join("llms.txt")).unwrap();
    assert!(text.contains("- brp-react: Test skill brp-react."));
    assert!(text.contains("skills/brp-react/SKILL.md"));
}

#[cfg(unix)]
#[test]
fn test_clean_removes_stale_entries() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    std::fs::create_dir_all(&root).unwrap();
    let home = make_home(dir.path(), &[".cursor"]);
    let skills_dir = home.join(".cursor/skills");
    std::fs::create_dir_all(skills_dir.join("brp-stale")).unwrap();
    std::fs::create_dir_all(skills_dir.join("unrelated")).unwrap();
    let canonical = home.join(".agents/skills");
    std::fs::create_dir_all(canonical.join("brp-stale")).unwrap();
    std::fs::create_dir_all(canonical.join("unrelated")).unwrap();

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("brp-stale"));

    // canonical is swept by default, alongside every installed target
    assert!(!canonical.join("brp-stale").exists());
    assert!(canonical.join("unrelated").exists());
    assert!(!skills_dir.join("brp-stale").exists());
    assert!(skills_dir.join("unrelated").exists());
}

#[test]
fn test_clean_skip_canonical_leaves_canonical_alone() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    std::fs::create_dir_all(&root).unwrap();
    let home = make_home(dir.path(), &[".cursor"]);
    let skills_dir = home.join(".cursor/skills");
    std::fs::create_dir_all(skills_dir.join("brp-stale")).unwrap();
    let canonical = home.join(".agents/skills");
    std::fs::create_dir_all(canonical.join("brp-stale")).unwrap();

    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .args(["clean", "--skip-canonical"])
        .assert()
        .success();

    assert!(canonical.join("brp-stale").exists());
    assert!(!skills_dir.join("brp-stale").exists());
}

#[test]
fn test_robot_error_envelope() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("project");
    std::fs::create_dir_all(&root).unwrap();
    let home = make_home(dir.path(), &[]);

    // no skills and no expected version: config error in robot mode
    let mut cmd = Command::cargo_bin("sf").unwrap();
    let output = cmd
        .env("SF_ROOT", &root)
        .env("SF_HOME", &home)
        .args(["--robot", "check-version"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["status"]["error"]["code"].is_string());
    assert!(json["status"]["error"]["message"].is_string());
    assert_eq!(json["data"], Value::Null);
}
