//! Integration tests for the bring binary.
//!
//! These tests run the compiled binary end to end: argument parsing, config
//! loading, exit status and output.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `bring` command isolated from the user's config.
fn bring(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bring").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("BRANCHRING_CONFIG")
        .arg("--no-interactive");
    cmd
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git command failed");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "-q"]);
    run_git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["config", "user.name", "Test User"]);
    std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
    run_git(dir.path(), &["add", "README.md"]);
    run_git(dir.path(), &["commit", "-q", "-m", "Initial commit"]);
    dir
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().unwrap();
    bring(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bring"));
}

#[test]
fn self_test_passes() {
    let home = TempDir::new().unwrap();
    bring(home.path())
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Testing Ring Stack"))
        .stdout(predicate::str::contains("push_pop - OK"))
        .stdout(predicate::str::contains("FAIL").not());
}

#[test]
fn completion_names_the_binary() {
    let home = TempDir::new().unwrap();
    bring(home.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bring"));
}

#[test]
fn outside_repository_fails() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    bring(home.path())
        .arg("--cwd")
        .arg(dir.path())
        .arg("next")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn push_then_ring_lists_entries() {
    let home = TempDir::new().unwrap();
    let repo = init_repo();

    bring(home.path())
        .arg("--cwd")
        .arg(repo.path())
        .args(["push", "-b", "topic"])
        .assert()
        .success();

    bring(home.path())
        .arg("--cwd")
        .arg(repo.path())
        .arg("ring")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) main"))
        .stdout(predicate::str::contains("2) topic"));

    bring(home.path())
        .arg("--cwd")
        .arg(repo.path())
        .arg("curr")
        .assert()
        .success()
        .stdout("topic\n");

    assert!(home.path().join("branchring").join("rings.json").exists());
}

#[test]
fn state_file_flag_wins() {
    let home = TempDir::new().unwrap();
    let repo = init_repo();
    let state = home.path().join("custom.json");

    bring(home.path())
        .arg("--cwd")
        .arg(repo.path())
        .arg("--state-file")
        .arg(&state)
        .arg("curr")
        .assert()
        .success()
        .stdout("main\n");

    assert!(state.exists());
    assert!(!home.path().join("branchring").join("rings.json").exists());
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("branchring");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "bogus = 1\n").unwrap();

    bring(home.path())
        .arg("test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
