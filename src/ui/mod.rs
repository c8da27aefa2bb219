//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts with a bounded wait
//! - [`output`] - Output formatting and display
//! - [`ring_view`] - Ring listing shown by most commands
//!
//! # Design
//!
//! All output and prompts go through this module to ensure consistent
//! formatting and proper handling of quiet, verbose and non-interactive
//! modes.

pub mod output;
pub mod prompts;
pub mod ring_view;
