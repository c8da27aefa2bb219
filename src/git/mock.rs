//! git::mock
//!
//! In-memory reference source for deterministic testing.
//!
//! # Design
//!
//! The mock keeps a set of existing branches and a current branch. Checkouts
//! succeed for existing branches (or for `-b <name>` creation) and fail
//! otherwise, mirroring the behavior the ring relies on. Every checkout is
//! recorded so tests can assert on what was attempted.
//!
//! # Example
//!
//! ```
//! use branchring::core::types::BranchName;
//! use branchring::git::mock::MockSource;
//! use branchring::git::ReferenceSource;
//!
//! let source = MockSource::new(&["main", "feature"], "main");
//! let feature = BranchName::new("feature").unwrap();
//!
//! assert!(source.checkout(Some(&feature), &[]).succeeded);
//! assert_eq!(source.current_reference().unwrap(), "feature");
//!
//! source.delete_branch("feature");
//! assert!(!source.reference_exists(&feature));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use super::source::{CheckoutOutcome, ReferenceSource};
use super::GitError;
use crate::core::types::BranchName;

/// Mock reference source for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
}

#[derive(Debug)]
struct MockSourceInner {
    root: PathBuf,
    branches: BTreeSet<String>,
    current: String,
    statuses: BTreeMap<String, String>,
    /// Branch names whose checkout fails even though they exist.
    fail_checkout: BTreeSet<String>,
    /// Recorded checkout targets, in order.
    checkouts: Vec<Option<String>>,
}

impl MockSource {
    /// Create a mock with the given branches, checked out on `current`.
    pub fn new(branches: &[&str], current: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockSourceInner {
                root: PathBuf::from("/mock/repo"),
                branches: branches.iter().map(|b| b.to_string()).collect(),
                current: current.to_string(),
                statuses: BTreeMap::new(),
                fail_checkout: BTreeSet::new(),
                checkouts: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockSourceInner> {
        // A panicking test poisons the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Use a different repository root.
    pub fn with_root(self, root: impl Into<PathBuf>) -> Self {
        self.lock().root = root.into();
        self
    }

    /// Simulate creating a branch outside the tool.
    pub fn add_branch(&self, name: &str) {
        self.lock().branches.insert(name.to_string());
    }

    /// Simulate deleting a branch outside the tool.
    pub fn delete_branch(&self, name: &str) {
        self.lock().branches.remove(name);
    }

    /// Simulate a manual `git checkout` outside the tool.
    pub fn set_current(&self, name: &str) {
        self.lock().current = name.to_string();
    }

    /// Set the divergence token reported for `branch`.
    pub fn set_status(&self, branch: &str, status: &str) {
        self.lock()
            .statuses
            .insert(branch.to_string(), status.to_string());
    }

    /// Make checkouts of `name` fail.
    pub fn fail_checkout_of(&self, name: &str) {
        self.lock().fail_checkout.insert(name.to_string());
    }

    /// Checkout targets attempted so far.
    pub fn checkouts(&self) -> Vec<Option<String>> {
        self.lock().checkouts.clone()
    }
}

impl ReferenceSource for MockSource {
    fn root(&self) -> Result<PathBuf, GitError> {
        Ok(self.lock().root.clone())
    }

    fn list_references(&self) -> Result<BTreeSet<BranchName>, GitError> {
        self.lock()
            .branches
            .iter()
            .map(|b| BranchName::new(b.as_str()).map_err(GitError::from))
            .collect()
    }

    fn current_reference(&self) -> Result<BranchName, GitError> {
        Ok(BranchName::new(self.lock().current.as_str())?)
    }

    fn checkout(&self, target: Option<&BranchName>, extra_args: &[String]) -> CheckoutOutcome {
        let mut inner = self.lock();
        inner.checkouts.push(target.map(|t| t.to_string()));

        let wanted = match (extra_args, target) {
            ([flag, name, ..], _) if flag == "-b" => {
                inner.branches.insert(name.clone());
                name.clone()
            }
            (_, Some(target)) => target.to_string(),
            ([.., name], None) => name.clone(),
            ([], None) => return CheckoutOutcome::ok(""),
        };

        if !inner.branches.contains(&wanted) || inner.fail_checkout.contains(&wanted) {
            return CheckoutOutcome::failed(format!(
                "error: pathspec '{wanted}' did not match any file(s) known to git"
            ));
        }

        inner.current = wanted.clone();
        CheckoutOutcome::ok(format!("Switched to branch '{wanted}'"))
    }

    fn reference_exists(&self, name: &BranchName) -> bool {
        self.lock().branches.contains(name.as_str())
    }

    fn ahead_behind(&self, local: &str, _upstream: &str) -> Result<String, GitError> {
        self.lock()
            .statuses
            .get(local)
            .cloned()
            .ok_or_else(|| GitError::RefNotFound {
                refname: local.to_string(),
            })
    }

    fn statuses(&self) -> Result<BTreeMap<BranchName, String>, GitError> {
        self.lock()
            .statuses
            .iter()
            .map(|(b, s)| Ok((BranchName::new(b.as_str())?, s.clone())))
            .collect()
    }
}
