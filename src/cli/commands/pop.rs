//! pop command - Drop the current branch from the ring
//!
//! # Behavior
//!
//! - Removes the current entry; the cursor moves to the entry before it
//! - Checks out the new current entry, if any
//! - Popping an empty ring is a fatal error
//!
//! The branch itself is never deleted from the repository.

use anyhow::Result;

use crate::core::ring::RingStack;
use crate::engine::session::Session;
use crate::engine::Context;
use crate::git::ReferenceSource;
use crate::ui::output;

/// Pop the current branch off the ring and switch to the one before it.
pub fn pop(ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    let mut session = Session::prepare(ctx, source)?;
    pop_and_checkout(ctx, source, &mut session.stack)
}

/// Pop from `stack` and check out whatever is current afterwards.
pub(crate) fn pop_and_checkout(
    ctx: &Context,
    source: &dyn ReferenceSource,
    stack: &mut RingStack,
) -> Result<()> {
    let verbosity = ctx.verbosity();

    let old = stack.pop()?;
    let new = stack.current().cloned();

    output::debug(
        format!(
            "Old: {old}; New: {}",
            new.as_ref().map_or("(none)", |b| b.as_str())
        ),
        verbosity,
    );

    if let Some(new) = new {
        let outcome = source.checkout(Some(&new), &[]);
        if !outcome.succeeded {
            output::warn(
                format!("could not check out {new}: {}", outcome.output),
                verbosity,
            );
        }
    }

    Ok(())
}
