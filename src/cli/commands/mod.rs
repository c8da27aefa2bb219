//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each repository command handler:
//! 1. Prepares a [`crate::engine::Session`] (load + reconcile)
//! 2. Mutates the ring and checks out branches through the
//!    [`ReferenceSource`]
//! 3. Renders the result
//!
//! Handlers take `&dyn ReferenceSource`, so tests drive them with
//! [`crate::git::mock::MockSource`]. `test` and `completion` need no
//! repository.

mod clean;
mod completion;
mod curr;
mod navigation;
mod pop;
mod push;
mod ring;
mod selftest;

// Re-export command functions for testing and direct invocation
pub use clean::clean;
pub use completion::completion;
pub use curr::curr;
pub use navigation::{cycle, next, prev, Direction};
pub use pop::pop;
pub use push::push;
pub use ring::{apply_selection, ring};
pub use selftest::{run_checks, selftest};

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::engine::Context;
use crate::git::{Git, ReferenceSource};

/// Dispatch a command to its handler.
///
/// Repository commands open the repository at the context's working
/// directory first.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Test => selftest::selftest(ctx),
        Command::Completion { shell } => completion::completion(shell),
        command => {
            let cwd = ctx.cwd().context("Failed to determine working directory")?;
            let git = Git::open(&cwd, &ctx.remote, ctx.verbosity())?;
            dispatch_with(command, ctx, &git)
        }
    }
}

/// Dispatch a command against an explicit reference source.
pub fn dispatch_with(command: Command, ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    match command {
        Command::Push { args } => push::push(ctx, source, &args),
        Command::Pop => pop::pop(ctx, source),
        Command::Next => navigation::next(ctx, source),
        Command::Prev => navigation::prev(ctx, source),
        Command::Curr => curr::curr(ctx, source),
        Command::Ring => ring::ring(ctx, source),
        Command::Clean => clean::clean(ctx, source),
        Command::Test => selftest::selftest(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}
