//! Tests for the sync-deps use case

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::infrastructure::repositories::TomlManifestRepository;

const ROOT: &str = "[project]\nname = \"examples\"\ndependencies = [\"runpod-flash\"]\n";

fn example_manifest(root: &Path, example: &str, deps: &[&str]) {
    let dir = root.join(example);
    fs::create_dir_all(&dir).unwrap();
    let list: Vec<String> = deps.iter().map(|d| format!("\"{d}\"")).collect();
    fs::write(
        dir.join("pyproject.toml"),
        format!("[project]\nname = \"x\"\ndependencies = [{}]\n", list.join(", ")),
    )
    .unwrap();
}

fn run(root: &Path, mode: SyncMode) -> SyncDepsResult {
    SyncDepsUseCase::new(TomlManifestRepository::default())
        .execute(&SyncDepsOptions::new(root), mode)
        .unwrap()
}

#[test]
fn write_mode_updates_root_manifest() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("pyproject.toml"), ROOT).unwrap();
    example_manifest(root, "02_ml/sd", &["torch==2.1.0", "fastapi"]);
    example_manifest(root, "02_ml/llm", &["torch==2.1.0", "transformers>=4.40"]);

    let result = run(root, SyncMode::Write);
    assert!(result.written);
    assert_eq!(
        result.dependencies,
        vec!["runpod-flash", "torch==2.1.0", "transformers>=4.40"]
    );
    assert!(result.conflicts.is_empty());

    let again = run(root, SyncMode::Check);
    assert!(!again.changed);
    assert!(again.is_success());
}

#[test]
fn conflicts_are_listed_not_resolved() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("pyproject.toml"), ROOT).unwrap();
    example_manifest(root, "02_ml/a", &["torch==2.1.0"]);
    example_manifest(root, "02_ml/b", &["torch>=2.2.0"]);

    let result = run(root, SyncMode::Write);
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(
        result.conflicts[0].examples,
        vec!["02_ml/a".to_string(), "02_ml/b".to_string()]
    );
    let written = fs::read_to_string(root.join("pyproject.toml")).unwrap();
    assert!(written.contains("torch==2.1.0"));
    assert!(written.contains("torch>=2.2.0"));
    assert!(written.contains("[tool.workerhub.conflicts.torch]"));
}

#[test]
fn dry_run_shows_diff_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("pyproject.toml"), ROOT).unwrap();
    example_manifest(root, "02_ml/sd", &["diffusers"]);

    let result = run(root, SyncMode::DryRun);
    assert!(result.changed);
    assert!(!result.written);
    let diff = result.diff.unwrap();
    assert!(diff.starts_with("--- a/pyproject.toml"));
    assert!(diff
        .lines()
        .any(|l| l.starts_with('+') && l.contains("diffusers")));
    assert_eq!(fs::read_to_string(root.join("pyproject.toml")).unwrap(), ROOT);
}

#[test]
fn check_fails_when_out_of_sync() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("pyproject.toml"), ROOT).unwrap();
    example_manifest(root, "02_ml/sd", &["diffusers"]);

    let result = run(root, SyncMode::Check);
    assert!(result.changed);
    assert!(!result.is_success());
    assert_eq!(fs::read_to_string(root.join("pyproject.toml")).unwrap(), ROOT);
}

#[test]
fn broken_example_manifest_is_a_warning() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("pyproject.toml"), ROOT).unwrap();
    fs::create_dir_all(root.join("02_ml/bad")).unwrap();
    fs::write(root.join("02_ml/bad/pyproject.toml"), "[project\n").unwrap();
    example_manifest(root, "02_ml/good", &["numpy"]);

    let result = run(root, SyncMode::Check);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.manifests_read, 1);
    assert!(result.dependencies.contains(&"numpy".to_string()));
}

#[test]
fn repeated_write_leaves_synced_root_alone() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("pyproject.toml"), ROOT).unwrap();
    example_manifest(root, "02_ml/sd", &["torch==2.1.0"]);

    assert!(run(root, SyncMode::Write).written);
    let synced = fs::read_to_string(root.join("pyproject.toml")).unwrap();

    let second = run(root, SyncMode::Write);
    assert!(!second.written);
    assert!(!second.changed);
    assert_eq!(fs::read_to_string(root.join("pyproject.toml")).unwrap(), synced);
    assert!(root.join("pyproject.toml.lock").is_file());
}
