//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to the repository. Queries go
//! through `git2`; checkout shells out to the `git` CLI because the `push`
//! command forwards arbitrary user arguments (`-b new-branch`, `--track`,
//! paths) that only the porcelain understands.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working directory
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//!
//! # Example
//!
//! ```ignore
//! use branchring::git::{Git, ReferenceSource};
//! use branchring::ui::output::Verbosity;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."), "origin", Verbosity::Normal)?;
//! println!("on {}", git.current_reference()?);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::source::{format_ahead_behind, CheckoutOutcome, ReferenceSource};
use crate::core::types::{BranchName, TypeError};
use crate::ui::output::{self, Verbosity};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error, naming the ref involved.
    fn from_git2(err: git2::Error, refname: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch => GitError::RefNotFound {
                refname: refname.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", refname, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidBranchName(msg) => GitError::InvalidRefName { message: msg },
        }
    }
}

/// The Git interface.
///
/// Wraps an opened repository together with the remote whose tracking
/// branches count as ring references.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
    /// Remote consulted for remote-tracking branches
    remote: String,
    /// Controls logging of spawned git commands
    verbosity: Verbosity,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .field("remote", &self.remote)
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path, remote: &str, verbosity: Verbosity) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self {
            repo,
            remote: remote.to_string(),
            verbosity,
        })
    }

    fn workdir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    fn ref_exists(&self, refname: &str) -> bool {
        self.repo.find_reference(refname).is_ok()
    }

    fn resolve_commit(&self, spec: &str) -> Result<git2::Oid, GitError> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|e| GitError::from_git2(e, spec))?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, spec))?;
        Ok(commit.id())
    }

    /// Name HEAD points at when the branch has no commits yet.
    fn unborn_branch(&self) -> Result<BranchName, GitError> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        let target = head.symbolic_target().ok_or_else(|| GitError::RefNotFound {
            refname: "HEAD".to_string(),
        })?;
        let name = target.strip_prefix("refs/heads/").unwrap_or(target);
        Ok(BranchName::new(name)?)
    }
}

impl ReferenceSource for Git {
    fn root(&self) -> Result<PathBuf, GitError> {
        let workdir = self.workdir()?;
        let root = std::fs::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
        // Normalizing through components drops the trailing separator.
        Ok(root.components().collect())
    }

    fn list_references(&self) -> Result<BTreeSet<BranchName>, GitError> {
        let branches = self.repo.branches(None)?;
        let remote_prefix = format!("{}/", self.remote);

        let mut names = BTreeSet::new();
        for branch in branches {
            let (branch, kind) = branch?;
            let Some(name) = branch.name().ok().flatten() else {
                continue;
            };

            let name = match kind {
                git2::BranchType::Local => name,
                git2::BranchType::Remote => match name.strip_prefix(&remote_prefix) {
                    Some("HEAD") | None => continue,
                    Some(stripped) => stripped,
                },
            };

            if let Ok(branch_name) = BranchName::new(name) {
                names.insert(branch_name);
            }
        }

        Ok(names)
    }

    fn current_reference(&self) -> Result<BranchName, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return self.unborn_branch(),
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(BranchName::new(name)?);
            }
        }

        // Detached: identify HEAD by its abbreviated commit id.
        let commit = head
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        let short = commit.as_object().short_id()?;
        let short = short.as_str().ok_or_else(|| GitError::Internal {
            message: "abbreviated commit id is not UTF-8".to_string(),
        })?;
        Ok(BranchName::new(short)?)
    }

    fn checkout(&self, target: Option<&BranchName>, extra_args: &[String]) -> CheckoutOutcome {
        let mut args: Vec<&str> = vec!["checkout"];
        args.extend(extra_args.iter().map(String::as_str));
        if let Some(target) = target {
            args.push(target.as_str());
        }

        output::debug(format!("Running: 'git {}'", args.join(" ")), self.verbosity);

        let workdir = match self.workdir() {
            Ok(dir) => dir,
            Err(e) => return CheckoutOutcome::failed(e.to_string()),
        };

        match Command::new("git").args(&args).current_dir(workdir).output() {
            Ok(out) => {
                let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&out.stderr));
                CheckoutOutcome {
                    succeeded: out.status.success(),
                    output: text.trim().to_string(),
                }
            }
            Err(e) => CheckoutOutcome::failed(format!("failed to run git checkout: {e}")),
        }
    }

    fn reference_exists(&self, name: &BranchName) -> bool {
        self.ref_exists(&format!("refs/heads/{name}"))
            || self.ref_exists(&format!("refs/remotes/{}/{name}", self.remote))
    }

    fn ahead_behind(&self, local: &str, upstream: &str) -> Result<String, GitError> {
        let local_oid = self.resolve_commit(local)?;
        let upstream_oid = self.resolve_commit(upstream)?;
        let (ahead, behind) = self.repo.graph_ahead_behind(local_oid, upstream_oid)?;
        Ok(format_ahead_behind(ahead, behind))
    }

    fn statuses(&self) -> Result<BTreeMap<BranchName, String>, GitError> {
        let mut out = BTreeMap::new();

        for branch in self.repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = branch?;
            let Some(local) = branch.name().ok().flatten().map(str::to_string) else {
                continue;
            };
            let Ok(upstream) = branch.upstream() else {
                continue;
            };
            let Some(upstream) = upstream.name().ok().flatten().map(str::to_string) else {
                continue;
            };
            let Ok(name) = BranchName::new(local.as_str()) else {
                continue;
            };

            // A gone upstream leaves the branch without a status.
            if let Ok(status) = self.ahead_behind(&local, &upstream) {
                out.insert(name, status);
            }
        }

        Ok(out)
    }
}
