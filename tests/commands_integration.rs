//! Integration tests for the ring commands.
//!
//! These tests verify that commands work correctly with real git repositories.
//! They exercise the full command flow: Load → Reconcile → Mutate → Checkout.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use branchring::cli::args::Command as Cmd;
use branchring::cli::commands;
use branchring::core::state::StateStore;
use branchring::core::types::BranchName;
use branchring::engine::Context;
use branchring::git::{Git, ReferenceSource};
use branchring::ui::output::Verbosity;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Test fixture that creates a real git repository plus a private state file.
struct TestRepo {
    dir: TempDir,
    state: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit on main.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let state = TempDir::new().expect("failed to create state dir");

        run_git(dir.path(), &["init", "-q"]);
        run_git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        std::fs::write(dir.path().join("README.md"), "# Test Repo\n").unwrap();
        run_git(dir.path(), &["add", "README.md"]);
        run_git(dir.path(), &["commit", "-q", "-m", "Initial commit"]);

        Self { dir, state }
    }

    /// Get the path to the repository.
    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn state_file(&self) -> PathBuf {
        self.state.path().join("rings.json")
    }

    /// Open a Git interface to this repository.
    fn git(&self) -> Git {
        Git::open(self.path(), "origin", Verbosity::Quiet).expect("failed to open test repo")
    }

    /// Context pointed at this repository.
    fn context(&self) -> Context {
        Context {
            cwd: Some(self.path().to_path_buf()),
            quiet: true,
            interactive: false,
            state_file: self.state_file(),
            ..Default::default()
        }
    }

    fn run(&self, command: Cmd) -> anyhow::Result<()> {
        commands::dispatch(command, &self.context())
    }

    /// Ring entries and cursor as persisted for this repository.
    fn ring(&self) -> (Vec<String>, Option<usize>) {
        let root = self.git().root().unwrap().display().to_string();
        let (store, failure) = StateStore::open(self.state_file());
        assert!(failure.is_none(), "{failure:?}");

        let record = store.record(&root).cloned().unwrap_or_default();
        (
            record.ring.iter().map(|b| b.to_string()).collect(),
            record.position,
        )
    }

    fn current(&self) -> String {
        self.git().current_reference().unwrap().to_string()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn push(args: &[&str]) -> Cmd {
    Cmd::Push {
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn push_records_branches_in_visit_order() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["branch", "feature"]);

    repo.run(push(&["feature"])).unwrap();
    repo.run(push(&["-b", "topic"])).unwrap();

    assert_eq!(repo.current(), "topic");
    assert_eq!(
        repo.ring(),
        (vec!["main".into(), "feature".into(), "topic".into()], Some(2))
    );
}

#[test]
fn next_and_prev_wrap_around() {
    let repo = TestRepo::new();
    repo.run(push(&["-b", "feature"])).unwrap();
    repo.run(push(&["-b", "topic"])).unwrap();

    repo.run(Cmd::Next).unwrap();
    assert_eq!(repo.current(), "main");

    repo.run(Cmd::Prev).unwrap();
    assert_eq!(repo.current(), "topic");

    repo.run(Cmd::Prev).unwrap();
    assert_eq!(repo.current(), "feature");
    assert_eq!(repo.ring().1, Some(1));
}

#[test]
fn pop_returns_to_previous_branch() {
    let repo = TestRepo::new();
    repo.run(push(&["-b", "feature"])).unwrap();
    repo.run(push(&["-b", "topic"])).unwrap();

    repo.run(Cmd::Pop).unwrap();

    assert_eq!(repo.current(), "feature");
    assert_eq!(
        repo.ring(),
        (vec!["main".into(), "feature".into()], Some(1))
    );
    // The branch itself survives.
    assert!(repo
        .git()
        .reference_exists(&BranchName::new("topic").unwrap()));
}

#[test]
fn manual_checkout_is_picked_up() {
    let repo = TestRepo::new();
    repo.run(push(&["-b", "feature"])).unwrap();
    run_git(repo.path(), &["checkout", "-q", "-b", "manual"]);

    repo.run(Cmd::Curr).unwrap();

    assert_eq!(
        repo.ring(),
        (
            vec!["main".into(), "feature".into(), "manual".into()],
            Some(2)
        )
    );
}

// =============================================================================
// Reconciliation
// =============================================================================

#[test]
fn deleted_branch_is_dropped_before_navigating() {
    let repo = TestRepo::new();
    repo.run(push(&["-b", "feature"])).unwrap();
    repo.run(push(&["-b", "topic"])).unwrap();
    run_git(repo.path(), &["branch", "-q", "-D", "feature"]);

    repo.run(Cmd::Prev).unwrap();

    assert_eq!(repo.current(), "main");
    assert_eq!(
        repo.ring(),
        (vec!["main".into(), "topic".into()], Some(0))
    );
}

#[test]
fn clean_prunes_every_dead_entry() {
    let repo = TestRepo::new();
    for name in ["one", "two", "three"] {
        repo.run(push(&["-b", name])).unwrap();
    }
    repo.run(push(&["main"])).unwrap();
    run_git(repo.path(), &["branch", "-q", "-D", "one", "three"]);

    repo.run(Cmd::Clean).unwrap();

    assert_eq!(
        repo.ring(),
        (vec!["main".into(), "two".into()], Some(0))
    );
}

#[test]
fn remote_tracking_branch_keeps_entry_alive() {
    let repo = TestRepo::new();
    repo.run(push(&["-b", "shared"])).unwrap();
    repo.run(push(&["main"])).unwrap();
    run_git(
        repo.path(),
        &["update-ref", "refs/remotes/origin/shared", "shared"],
    );
    run_git(repo.path(), &["branch", "-q", "-D", "shared"]);

    repo.run(Cmd::Clean).unwrap();

    assert_eq!(repo.ring().0, vec!["main".to_string(), "shared".to_string()]);
}

// =============================================================================
// State
// =============================================================================

#[test]
fn rings_are_kept_per_repository() {
    let first = TestRepo::new();
    let second = TestRepo::new();
    let shared_state = first.state_file();

    let ctx_for = |repo: &TestRepo| Context {
        state_file: shared_state.clone(),
        ..repo.context()
    };

    commands::dispatch(push(&["-b", "alpha"]), &ctx_for(&first)).unwrap();
    commands::dispatch(push(&["-b", "beta"]), &ctx_for(&second)).unwrap();

    let (store, _) = StateStore::open(&shared_state);
    assert_eq!(store.state().len(), 2);

    let root = first.git().root().unwrap().display().to_string();
    let names: Vec<String> = store
        .record(&root)
        .unwrap()
        .ring
        .iter()
        .map(|b| b.to_string())
        .collect();
    assert_eq!(names, vec!["main", "alpha"]);
}

#[test]
fn corrupt_state_file_starts_fresh() {
    let repo = TestRepo::new();
    std::fs::write(repo.state_file(), "not json").unwrap();

    repo.run(push(&["-b", "feature"])).unwrap();

    assert_eq!(
        repo.ring(),
        (vec!["main".into(), "feature".into()], Some(1))
    );
}

#[test]
fn outside_a_repository_is_an_error() {
    let dir = TempDir::new().unwrap();
    let ctx = Context {
        cwd: Some(dir.path().to_path_buf()),
        quiet: true,
        state_file: dir.path().join("rings.json"),
        ..Default::default()
    };

    assert!(commands::dispatch(Cmd::Next, &ctx).is_err());
    assert!(!dir.path().join("rings.json").exists());
}
