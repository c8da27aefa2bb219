//! core::reconcile
//!
//! Self-healing of the stored ring against the live repository.
//!
//! # Why this runs first
//!
//! Branches can be deleted and checked out behind the tool's back. Before any
//! command touches the ring, [`Reconciler::fix_ring`] drops entries that no
//! longer exist and puts the cursor back on the branch actually checked out,
//! so the stored cursor never points at a stale entry.
//!
//! # Checkout failures
//!
//! A branch can also vanish between reconciliation and checkout.
//! [`Reconciler::recover_failed_checkout`] purges the failed target and
//! reconciles again, anchored on the branch the user started from.

use std::collections::BTreeSet;

use owo_colors::OwoColorize;

use crate::core::ring::{RingError, RingStack};
use crate::core::types::BranchName;
use crate::git::ReferenceSource;
use crate::ui::output::{self, Verbosity};

/// Repairs a [`RingStack`] using a [`ReferenceSource`].
pub struct Reconciler<'a, S: ReferenceSource + ?Sized> {
    source: &'a S,
    verbosity: Verbosity,
    color: bool,
}

impl<'a, S: ReferenceSource + ?Sized> Reconciler<'a, S> {
    /// Create a reconciler over `source`.
    pub fn new(source: &'a S, verbosity: Verbosity) -> Self {
        Self {
            source,
            verbosity,
            color: false,
        }
    }

    /// Colorize user-facing warnings.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Restore the ring's invariants around `anchor`.
    ///
    /// Entries that no longer exist are dropped. If the ring ends up empty,
    /// or its current entry is not `anchor`, `anchor` is pushed, which both
    /// inserts it if missing and moves the cursor onto it.
    pub fn fix_ring(&self, stack: &mut RingStack, anchor: &BranchName) -> Result<(), RingError> {
        let before = stack.len();
        stack.retain(|name| self.source.reference_exists(name))?;

        let dropped = before - stack.len();
        if dropped > 0 {
            output::debug(
                format!("Dropped {dropped} missing branch(es) from the ring"),
                self.verbosity,
            );
        }

        if stack.is_empty() || stack.current() != Some(anchor) {
            output::debug(format!("Re-anchoring ring on {anchor}"), self.verbosity);
            stack.push(anchor.clone())?;
        }

        stack.save()?;
        Ok(())
    }

    /// Keep only entries present in `live`, then [`Self::fix_ring`].
    ///
    /// Used by `clean`, which trusts a single listing of all references over
    /// per-entry existence checks.
    pub fn prune(
        &self,
        stack: &mut RingStack,
        live: &BTreeSet<BranchName>,
        anchor: &BranchName,
    ) -> Result<usize, RingError> {
        let before = stack.len();
        stack.retain(|name| live.contains(name))?;
        let removed = before - stack.len();

        self.fix_ring(stack, anchor)?;
        Ok(removed)
    }

    /// Recover after checking out `failed` did not work.
    ///
    /// Reports the failure, removes `failed` from the ring and reconciles
    /// around `original`, the branch the user was on before navigating.
    pub fn recover_failed_checkout(
        &self,
        stack: &mut RingStack,
        failed: &BranchName,
        original: &BranchName,
    ) -> Result<(), RingError> {
        let message =
            format!("Looks like {failed} no longer exists. Cleaned up - please re-select.");
        if self.color {
            output::print(message.yellow(), self.verbosity);
        } else {
            output::print(message, self.verbosity);
        }

        stack.remove(failed)?;
        self.fix_ring(stack, original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{RingRecord, StateStore};
    use crate::git::mock::MockSource;

    fn name(n: &str) -> BranchName {
        BranchName::new(n).unwrap()
    }

    fn stack_with(ring: &[&str], position: Option<usize>) -> RingStack {
        let mut store = StateStore::in_memory();
        *store.record_mut("/repo") = RingRecord {
            ring: ring.iter().map(|n| name(n)).collect(),
            position,
        };
        RingStack::new(store, "/repo")
    }

    fn ring(s: &RingStack) -> Vec<&str> {
        s.entries().iter().map(|b| b.as_str()).collect()
    }

    #[test]
    fn duplicate_entries_are_collapsed() {
        let source = MockSource::new(&["aaa", "bbb"], "aaa");
        let mut stack = stack_with(&["aaa", "bbb", "aaa"], Some(2));

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("aaa"))
            .unwrap();

        assert_eq!(ring(&stack), vec!["aaa", "bbb"]);
        assert_eq!(stack.position(), Some(0));
    }

    #[test]
    fn empty_ring_gets_current_branch() {
        let source = MockSource::new(&["main"], "main");
        let mut stack = stack_with(&[], None);

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("main"))
            .unwrap();

        assert_eq!(ring(&stack), ["main"]);
        assert_eq!(stack.current().unwrap(), "main");
    }

    #[test]
    fn dead_sole_entry_replaced_by_current() {
        let source = MockSource::new(&["main"], "main");
        let mut stack = stack_with(&["deleted"], Some(0));

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("main"))
            .unwrap();

        assert_eq!(ring(&stack), ["main"]);
        assert_eq!(stack.position(), Some(0));
    }

    #[test]
    fn manual_checkout_moves_cursor() {
        let source = MockSource::new(&["aaa", "bbb", "ccc"], "aaa");
        let mut stack = stack_with(&["aaa", "bbb", "ccc"], Some(2));

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("aaa"))
            .unwrap();

        assert_eq!(ring(&stack), ["aaa", "bbb", "ccc"]);
        assert_eq!(stack.current().unwrap(), "aaa");
    }

    #[test]
    fn new_branch_inserted_next_to_cursor() {
        let source = MockSource::new(&["aaa", "bbb", "ccc", "new"], "new");
        let mut stack = stack_with(&["aaa", "bbb", "ccc"], Some(0));

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("new"))
            .unwrap();

        assert_eq!(ring(&stack), ["aaa", "new", "bbb", "ccc"]);
        assert_eq!(stack.current().unwrap(), "new");
    }

    #[test]
    fn deleted_entry_before_cursor_keeps_current() {
        let source = MockSource::new(&["bbb", "ccc"], "ccc");
        let mut stack = stack_with(&["aaa", "bbb", "ccc"], Some(2));

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("ccc"))
            .unwrap();

        assert_eq!(ring(&stack), ["bbb", "ccc"]);
        assert_eq!(stack.current().unwrap(), "ccc");
    }

    #[test]
    fn stale_position_repaired() {
        let source = MockSource::new(&["aaa", "bbb"], "bbb");
        let mut stack = stack_with(&["aaa", "bbb"], Some(9));

        Reconciler::new(&source, Verbosity::Quiet)
            .fix_ring(&mut stack, &name("bbb"))
            .unwrap();

        assert_eq!(stack.position(), Some(1));
    }

    #[test]
    fn prune_keeps_only_live_references() {
        let source = MockSource::new(&["aaa", "ccc"], "ccc");
        let mut stack = stack_with(&["aaa", "bbb", "ccc"], Some(2));
        let live = source.list_references().unwrap();

        let removed = Reconciler::new(&source, Verbosity::Quiet)
            .prune(&mut stack, &live, &name("ccc"))
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(ring(&stack), ["aaa", "ccc"]);
        assert_eq!(stack.current().unwrap(), "ccc");
    }

    #[test]
    fn failed_checkout_purges_target_and_restores_origin() {
        let source = MockSource::new(&["aaa", "ccc"], "aaa");
        // "bbb" vanished after the ring moved onto it.
        let mut stack = stack_with(&["aaa", "bbb", "ccc"], Some(1));

        Reconciler::new(&source, Verbosity::Quiet)
            .recover_failed_checkout(&mut stack, &name("bbb"), &name("aaa"))
            .unwrap();

        assert_eq!(ring(&stack), ["aaa", "ccc"]);
        assert_eq!(stack.current().unwrap(), "aaa");
    }
}
