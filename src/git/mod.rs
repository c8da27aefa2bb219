//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. Everything else talks to the
//! repository through the [`ReferenceSource`] trait, which [`Git`] implements
//! over `git2` and [`mock::MockSource`] implements in memory. No other module
//! should import `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and the working-directory root
//! - Listing local and remote-tracking branches
//! - Reading the current branch (or detached commit)
//! - Checking out branches
//! - Ahead/behind status against upstream

mod interface;
pub mod mock;
mod source;

pub use interface::{Git, GitError};
pub use source::{format_ahead_behind, CheckoutOutcome, ReferenceSource};
