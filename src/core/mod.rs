//! core
//!
//! Core domain types, state and ring logic for branchring.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName
//! - [`ring`] - The ring stack and its cursor arithmetic
//! - [`reconcile`] - Self-healing of the ring against the repository
//! - [`selection`] - Parsing of interactive jump/delete input
//! - [`state`] - Persisted ring state for all repositories
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for storage
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid ring entries
//! - The ring never holds an invalid cursor after a mutation
//! - Every mutation is persisted before it returns

pub mod config;
pub mod paths;
pub mod reconcile;
pub mod ring;
pub mod selection;
pub mod state;
pub mod types;
