//! engine
//!
//! Orchestrates the command lifecycle: Load -> Reconcile -> Mutate -> Persist.
//!
//! # Command Lifecycle
//!
//! Every command follows the same lifecycle:
//!
//! ```text
//! Load state -> Reconcile ring -> Run command -> [Checkout] -> Render
//! ```
//!
//! Loading and reconciliation live in [`session::Session::prepare`]; the
//! command handlers in [`crate::cli::commands`] only see a ring that already
//! matches the repository.
//!
//! # Invariants
//!
//! - No command observes a ring that was not reconciled first
//! - Every ring mutation is persisted before the handler moves on

pub mod session;

pub use session::Session;

use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::{DEFAULT_REMOTE, DEFAULT_TIMEOUT_SECS};
use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains settings resolved from CLI flags and the config file.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive selection enabled.
    pub interactive: bool,
    /// How long `ring` waits for a selection.
    pub timeout: Duration,
    /// File holding the ring state.
    pub state_file: PathBuf,
    /// Remote whose tracking branches count as existing.
    pub remote: String,
    /// Colorize output.
    pub color: bool,
}

impl Context {
    /// Output verbosity derived from the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Directory commands run in.
    pub fn cwd(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            state_file: PathBuf::from("rings.json"),
            remote: DEFAULT_REMOTE.to_string(),
            color: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_quiet_about_debug() {
        let ctx = Context::default();
        assert!(!ctx.debug);
        assert!(!ctx.interactive);
        assert_eq!(ctx.verbosity(), Verbosity::Normal);
        assert_eq!(ctx.timeout, Duration::from_secs(10));
        assert_eq!(ctx.remote, "origin");
    }

    #[test]
    fn verbosity_follows_flags() {
        let ctx = Context {
            debug: true,
            ..Default::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Debug);

        let ctx = Context {
            debug: true,
            quiet: true,
            ..Default::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn explicit_cwd_wins() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/somewhere")),
            ..Default::default()
        };
        assert_eq!(ctx.cwd().unwrap(), PathBuf::from("/somewhere"));
    }
}
