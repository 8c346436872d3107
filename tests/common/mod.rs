//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Create a skill directory with a minimal SKILL.md under `parent`.
pub fn make_skill(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("SKILL.md"),
        format!(
            "---\nname: {name}\ndescription: Test skill {name}.\nmetadata:\n  version: 1.0.0\n---\n\n# {name}\n"
        ),
    )
    .unwrap();
    dir
}

/// Create a fake home directory containing root dirs for the given tools.
pub fn make_home(parent: &Path, tool_roots: &[&str]) -> PathBuf {
    let home = parent.join("home");
    std::fs::create_dir_all(&home).unwrap();
    for root in tool_roots {
        std::fs::create_dir_all(home.join(root)).unwrap();
    }
    home
}
