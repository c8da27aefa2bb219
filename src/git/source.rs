//! git::source
//!
//! The narrow capability surface the ring logic needs from version control.
//!
//! # Design
//!
//! Reconciliation and the commands only ever ask a handful of questions of the
//! repository. Keeping them behind a trait lets the core run against
//! [`crate::git::mock::MockSource`] in tests and against [`crate::git::Git`]
//! everywhere else.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::GitError;
use crate::core::types::BranchName;

/// Result of a checkout attempt.
///
/// Checkouts never fail with an error; a failed checkout is an ordinary
/// outcome the caller recovers from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// True if git exited successfully.
    pub succeeded: bool,
    /// Combined stdout and stderr of the checkout.
    pub output: String,
}

impl CheckoutOutcome {
    /// A successful checkout with the given output.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
        }
    }

    /// A failed checkout with the given output.
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: output.into(),
        }
    }
}

/// Queries and commands the ring needs from the repository.
pub trait ReferenceSource {
    /// Absolute path of the working directory root.
    ///
    /// This is the key a ring is stored under.
    fn root(&self) -> Result<PathBuf, GitError>;

    /// All local and remote-tracking branches.
    ///
    /// Remote-tracking names have their remote prefix stripped so they
    /// compare equal to their local counterparts. The remote's symbolic
    /// `HEAD` is excluded.
    fn list_references(&self) -> Result<BTreeSet<BranchName>, GitError>;

    /// The checked-out branch, or the abbreviated commit of a detached HEAD.
    fn current_reference(&self) -> Result<BranchName, GitError>;

    /// Run `git checkout <extra_args...> [target]`.
    fn checkout(&self, target: Option<&BranchName>, extra_args: &[String]) -> CheckoutOutcome;

    /// True if `name` exists locally or as a remote-tracking branch.
    fn reference_exists(&self, name: &BranchName) -> bool;

    /// Compact divergence token of `local` against `upstream`.
    ///
    /// See [`format_ahead_behind`].
    fn ahead_behind(&self, local: &str, upstream: &str) -> Result<String, GitError>;

    /// Divergence token for every local branch that has an upstream.
    fn statuses(&self) -> Result<BTreeMap<BranchName, String>, GitError>;
}

/// Render ahead/behind counts as a compact token.
///
/// `<N` means N commits behind upstream, `>M` means M ahead. Both parts are
/// omitted when zero, and an in-sync branch renders as `=`.
///
/// # Example
///
/// ```
/// use branchring::git::format_ahead_behind;
///
/// assert_eq!(format_ahead_behind(0, 0), "=");
/// assert_eq!(format_ahead_behind(2, 0), ">2");
/// assert_eq!(format_ahead_behind(1, 3), "<3>1");
/// ```
pub fn format_ahead_behind(ahead: usize, behind: usize) -> String {
    let mut out = String::new();
    if behind > 0 {
        out.push_str(&format!("<{behind}"));
    }
    if ahead > 0 {
        out.push_str(&format!(">{ahead}"));
    }
    if out.is_empty() {
        out.push('=');
    }
    out
}
