//! ring command - Show the ring and optionally jump or delete
//!
//! # Interactive selection
//!
//! After printing the ring, an interactive session waits up to `--timeout`
//! seconds for one line:
//!
//! - `3` checks out the third entry
//! - `d 2 4` removes the second and fourth entries
//!
//! Nothing entered, or anything unparsable, leaves the ring untouched.

use anyhow::Result;

use super::pop::pop_and_checkout;
use crate::core::selection::{Resolved, Selection, SelectionError};
use crate::core::types::BranchName;
use crate::engine::session::{reconciler, Session};
use crate::engine::Context;
use crate::git::ReferenceSource;
use crate::ui::output;
use crate::ui::prompts::{self, PromptError};

const PROMPT: &str = "Type a number to switch to another branch";

/// Print the ring and, when interactive, act on the user's selection.
pub fn ring(ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    let verbosity = ctx.verbosity();
    let mut session = Session::prepare(ctx, source)?;
    session.show(ctx, source);

    let line = match prompts::read_line_with_timeout(PROMPT, ctx.timeout, ctx.interactive) {
        Ok(Some(line)) => line,
        Ok(None) => {
            output::debug("No selection made", verbosity);
            return Ok(());
        }
        Err(PromptError::NotInteractive) => return Ok(()),
        Err(e) => {
            output::debug(format!("Could not read selection: {e}"), verbosity);
            return Ok(());
        }
    };

    apply_selection(ctx, source, &mut session, &line)
}

/// Act on one line of selection input against an already prepared session.
///
/// Selection errors are reported in verbose mode and otherwise ignored.
pub fn apply_selection(
    ctx: &Context,
    source: &dyn ReferenceSource,
    session: &mut Session,
    line: &str,
) -> Result<()> {
    let verbosity = ctx.verbosity();

    let resolved = match Selection::parse(line).and_then(|s| s.resolve(session.stack.entries())) {
        Ok(resolved) => resolved,
        Err(SelectionError::Empty) => return Ok(()),
        Err(e) => {
            output::debug(format!("Ignoring selection: {e}"), verbosity);
            return Ok(());
        }
    };

    match resolved {
        Resolved::Delete(names) => delete(ctx, source, session, &names),
        Resolved::Jump(target) => jump(ctx, source, session, &target),
    }
}

fn delete(
    ctx: &Context,
    source: &dyn ReferenceSource,
    session: &mut Session,
    names: &[BranchName],
) -> Result<()> {
    let verbosity = ctx.verbosity();

    for name in names {
        if session.stack.current() == Some(name) {
            output::print(format!("Popping {name}"), verbosity);
            pop_and_checkout(ctx, source, &mut session.stack)?;
        } else {
            output::print(format!("Deleting {name}"), verbosity);
            session.stack.remove(name)?;
        }
    }

    Ok(())
}

fn jump(
    ctx: &Context,
    source: &dyn ReferenceSource,
    session: &mut Session,
    target: &BranchName,
) -> Result<()> {
    let verbosity = ctx.verbosity();

    if *target == session.branch {
        output::debug(format!("Already on {target}"), verbosity);
        return Ok(());
    }

    output::print(format!("Checking out {target}"), verbosity);
    let outcome = source.checkout(Some(target), &[]);

    if !outcome.succeeded {
        output::debug(outcome.output, verbosity);
        reconciler(ctx, source).recover_failed_checkout(
            &mut session.stack,
            target,
            &session.branch,
        )?;
        output::print("", verbosity);
        session.show(ctx, source);
        return Ok(());
    }

    let now = source.current_reference()?;
    session.stack.push(now)?;
    Ok(())
}
