//! engine::session
//!
//! Per-invocation view of the ring: load, reconcile, render.
//!
//! # Lifecycle
//!
//! [`Session::prepare`] opens the state store, binds the ring for the
//! repository root, queries the checked-out branch and reconciles. Handlers
//! then mutate `session.stack`, which persists on its own.

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};

use super::Context;
use crate::core::reconcile::Reconciler;
use crate::core::ring::RingStack;
use crate::core::state::StateStore;
use crate::core::types::BranchName;
use crate::git::ReferenceSource;
use crate::ui::output;
use crate::ui::ring_view;

/// A reconciled ring plus the branch the user was on when the command began.
#[derive(Debug)]
pub struct Session {
    /// The ring for this repository.
    pub stack: RingStack,
    /// Branch checked out when the session was prepared.
    pub branch: BranchName,
}

impl Session {
    /// Load the ring for the repository behind `source` and reconcile it.
    ///
    /// An unreadable state file is replaced by an empty state; a repository
    /// that cannot report its root or current branch is an error.
    pub fn prepare(ctx: &Context, source: &dyn ReferenceSource) -> Result<Self> {
        let verbosity = ctx.verbosity();

        let root = source.root().context("Failed to locate repository root")?;
        let (store, failure) = StateStore::open(&ctx.state_file);
        if let Some(err) = failure {
            output::debug(format!("Starting from empty state: {err}"), verbosity);
        }
        output::debug(
            format!(
                "Loaded {} ring(s) from {}",
                store.state().len(),
                ctx.state_file.display()
            ),
            verbosity,
        );

        let mut stack = RingStack::new(store, root.display().to_string());
        let branch = source
            .current_reference()
            .context("Failed to determine current branch")?;

        reconciler(ctx, source).fix_ring(&mut stack, &branch)?;

        Ok(Self { stack, branch })
    }

    /// Print the ring with ahead/behind statuses.
    pub fn show(&self, ctx: &Context, source: &dyn ReferenceSource) {
        let verbosity = ctx.verbosity();
        let statuses = source.statuses().unwrap_or_else(|e| {
            output::debug(format!("No branch statuses: {e}"), verbosity);
            BTreeMap::new()
        });

        let lines = ring_view::render(
            self.stack.entries(),
            self.stack.position(),
            &statuses,
            output::use_color(ctx.color),
        );
        for line in lines {
            output::print(line, verbosity);
        }
    }
}

/// Reconciler configured from `ctx`.
pub fn reconciler<'a>(
    ctx: &Context,
    source: &'a dyn ReferenceSource,
) -> Reconciler<'a, dyn ReferenceSource + 'a> {
    Reconciler::new(source, ctx.verbosity()).with_color(output::use_color(ctx.color))
}
