//! cli
//!
//! Command-line interface layer for bring.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Merge flags over the config file into an [`engine::Context`]
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands`], which work on a reconciled [`crate::engine::Session`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::time::Duration;

use crate::core::config::Config;
use crate::engine;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = Config::load().context("Failed to load configuration")?;

    let ctx = context(&cli, &config);
    if let Some(path) = config.loaded_from() {
        output::debug(
            format!("Loaded config from {}", path.display()),
            ctx.verbosity(),
        );
    }

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}

/// Build the execution context. CLI flags take precedence over config.
pub fn context(cli: &Cli, config: &Config) -> engine::Context {
    engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.verbose,
        quiet: cli.quiet,
        interactive: cli.interactive(),
        timeout: Duration::from_secs(cli.timeout.unwrap_or_else(|| config.timeout())),
        state_file: cli
            .state_file
            .clone()
            .unwrap_or_else(|| config.state_file()),
        remote: config.remote().to_string(),
        color: config.color(),
    }
}
