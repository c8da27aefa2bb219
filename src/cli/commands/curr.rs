//! curr command - Print the current ring entry

use anyhow::Result;

use crate::engine::session::Session;
use crate::engine::Context;
use crate::git::ReferenceSource;
use crate::ui::output;

/// Print the branch under the cursor.
///
/// Prints nothing when the ring is empty; `--quiet` does not suppress the
/// name so the command stays usable in prompts and scripts.
pub fn curr(ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    let session = Session::prepare(ctx, source)?;

    match session.stack.current() {
        Some(current) => println!("{current}"),
        None => output::debug("No branches in the ring", ctx.verbosity()),
    }
    Ok(())
}
