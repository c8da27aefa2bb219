//! push command - Check out a branch and record it in the ring
//!
//! Arguments are forwarded verbatim to `git checkout`, so both
//! `push existing-branch` and `push -b new-branch` work. The branch that
//! ends up checked out is inserted right after the one the user came from.

use anyhow::{Context as _, Result};

use crate::engine::session::Session;
use crate::engine::Context;
use crate::git::ReferenceSource;
use crate::ui::output;

/// Run `git checkout <args>` and push the resulting branch.
pub fn push(ctx: &Context, source: &dyn ReferenceSource, args: &[String]) -> Result<()> {
    let verbosity = ctx.verbosity();
    let mut session = Session::prepare(ctx, source)?;

    let outcome = source.checkout(None, args);
    if !outcome.output.is_empty() {
        if outcome.succeeded {
            output::print(&outcome.output, verbosity);
        } else {
            output::warn(&outcome.output, verbosity);
        }
    }

    let new_branch = source
        .current_reference()
        .context("Failed to determine current branch")?;

    if new_branch != session.branch {
        output::debug(format!("Pushing {new_branch}"), verbosity);
        session.stack.push(new_branch)?;
    }

    Ok(())
}
