//! branchring - A ring of recently visited git branches
//!
//! branchring remembers, per repository, the branches you visit in a ring
//! with a cursor. `bring push` checks out a branch and records it right after
//! the current one; `bring next` / `bring prev` cycle through the ring with
//! wraparound; `bring pop` drops the current entry and goes back; `bring ring`
//! shows the ring and lets you jump to or delete entries.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, dispatches)
//! - [`engine`] - Execution context and the per-command session
//! - [`core`] - Ring stack, state store, reconciliation, selection, config
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - Output, prompts and ring rendering
//!
//! # Correctness Invariants
//!
//! branchring maintains the following invariants:
//!
//! 1. A ring never holds the same branch twice
//! 2. The cursor is `None` exactly when the ring is empty
//! 3. Every command reconciles the ring with the repository before using it
//! 4. Every mutation is persisted before the command moves on

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
