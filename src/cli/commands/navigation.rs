//! navigation commands - next, prev

use anyhow::Result;

use crate::engine::session::{reconciler, Session};
use crate::engine::Context;
use crate::git::ReferenceSource;
use crate::ui::output;

/// Which way to move around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
}

/// Check out the next branch in the ring.
pub fn next(ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    cycle(ctx, source, Direction::Forward)
}

/// Check out the previous branch in the ring.
pub fn prev(ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    cycle(ctx, source, Direction::Back)
}

/// Move the cursor one step and check out the branch under it.
///
/// If the checkout fails the target is purged and the ring is restored
/// around the branch the user started from.
pub fn cycle(ctx: &Context, source: &dyn ReferenceSource, direction: Direction) -> Result<()> {
    let verbosity = ctx.verbosity();
    let mut session = Session::prepare(ctx, source)?;

    let target = match direction {
        Direction::Forward => session.stack.forward()?,
        Direction::Back => session.stack.back()?,
    };

    let Some(target) = target else {
        output::debug("No branches in the ring", verbosity);
        return Ok(());
    };

    output::debug(format!("Moving to {target}"), verbosity);
    let outcome = source.checkout(Some(&target), &[]);

    if !outcome.succeeded {
        output::debug(outcome.output, verbosity);
        reconciler(ctx, source).recover_failed_checkout(
            &mut session.stack,
            &target,
            &session.branch,
        )?;
        output::print("", verbosity);
    }

    session.show(ctx, source);
    Ok(())
}
