//! test command - Built-in self-check of the ring
//!
//! Runs the ring scenarios against a throwaway state file and prints one
//! `<check> - OK` or `<check> - FAIL: <reason>` line per scenario. Needs no
//! repository.

use anyhow::{bail, ensure, Result};
use tempfile::TempDir;

use crate::core::ring::{RingError, RingStack};
use crate::core::state::StateStore;
use crate::core::types::BranchName;
use crate::engine::Context;
use crate::ui::output;

type Check = fn(&mut RingStack) -> Result<()>;

const CHECKS: &[(&str, Check)] = &[
    ("push_pop", push_pop),
    ("push_doesnt_add_duplicates", push_doesnt_add_duplicates),
    ("current_reports_correct_place", current_reports_correct_place),
    ("back_cycles_back_through_ring", back_cycles_back_through_ring),
    ("forward_cycles_forward_through_ring", forward_cycles_forward_through_ring),
    ("jumping_and_popping", jumping_and_popping),
    ("popping_from_head", popping_from_head),
    ("move_in_empty_ring", move_in_empty_ring),
    ("move_in_singleton_ring", move_in_singleton_ring),
    ("state_survives_reload", state_survives_reload),
];

/// Run every check; fails if any check failed.
pub fn selftest(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::print(
        format!(
            "\nTesting Ring Stack [{}]",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f")
        ),
        verbosity,
    );

    let failures = run_checks(|line| output::print(line, verbosity))?;
    if failures > 0 {
        bail!("{failures} self-test check(s) failed");
    }
    Ok(())
}

/// Run all checks, reporting each result through `report`.
///
/// Returns the number of failed checks.
pub fn run_checks(mut report: impl FnMut(String)) -> Result<usize> {
    let mut failures = 0;

    for (name, check) in CHECKS {
        // Each check gets its own state file.
        let dir = TempDir::new()?;
        let (store, _) = StateStore::open(dir.path().join("rings.json"));
        let mut stack = RingStack::new(store, "/selftest");

        match check(&mut stack) {
            Ok(()) => report(format!("{name} - OK")),
            Err(e) => {
                failures += 1;
                report(format!("{name} - FAIL: {e:#}"));
            }
        }
    }

    Ok(failures)
}

fn b(name: &str) -> Result<BranchName> {
    Ok(BranchName::new(name)?)
}

fn push_all(stack: &mut RingStack, names: &[&str]) -> Result<()> {
    for name in names {
        stack.push(b(name)?)?;
    }
    Ok(())
}

fn current_is(stack: &RingStack, expected: Option<&str>) -> Result<()> {
    let actual = stack.current().map(|n| n.as_str());
    ensure!(
        actual == expected,
        "current is {actual:?}, expected {expected:?}"
    );
    Ok(())
}

fn moved_to(got: Option<BranchName>, expected: &str) -> Result<()> {
    ensure!(
        got.as_ref().map(|n| n.as_str()) == Some(expected),
        "moved to {got:?}, expected {expected}"
    );
    Ok(())
}

fn popped(stack: &mut RingStack, expected: &str) -> Result<()> {
    let got = stack.pop()?;
    ensure!(got == expected, "popped {got}, expected {expected}");
    Ok(())
}

fn pop_is_empty(stack: &mut RingStack) -> Result<()> {
    match stack.pop() {
        Err(RingError::Empty) => Ok(()),
        Err(e) => bail!("unexpected error popping empty ring: {e}"),
        Ok(name) => bail!("popped {name} from a ring that should be empty"),
    }
}

fn push_pop(stack: &mut RingStack) -> Result<()> {
    stack.push(b("bob")?)?;
    popped(stack, "bob")?;
    pop_is_empty(stack)
}

fn push_doesnt_add_duplicates(stack: &mut RingStack) -> Result<()> {
    push_all(stack, &["bob", "bob"])?;
    popped(stack, "bob")?;
    pop_is_empty(stack)
}

fn current_reports_correct_place(stack: &mut RingStack) -> Result<()> {
    current_is(stack, None)?;
    stack.push(b("aaa")?)?;
    current_is(stack, Some("aaa"))?;
    stack.push(b("bbb")?)?;
    current_is(stack, Some("bbb"))?;
    stack.pop()?;
    current_is(stack, Some("aaa"))?;
    stack.pop()?;
    current_is(stack, None)
}

fn back_cycles_back_through_ring(stack: &mut RingStack) -> Result<()> {
    push_all(stack, &["aaa", "bbb", "ccc"])?;
    current_is(stack, Some("ccc"))?;
    for expected in ["bbb", "aaa", "ccc"] {
        moved_to(stack.back()?, expected)?;
        current_is(stack, Some(expected))?;
    }
    Ok(())
}

fn forward_cycles_forward_through_ring(stack: &mut RingStack) -> Result<()> {
    push_all(stack, &["aaa", "bbb", "ccc"])?;
    current_is(stack, Some("ccc"))?;
    for expected in ["aaa", "bbb", "ccc"] {
        moved_to(stack.forward()?, expected)?;
        current_is(stack, Some(expected))?;
    }
    Ok(())
}

fn jumping_and_popping(stack: &mut RingStack) -> Result<()> {
    push_all(stack, &["aaa", "bbb", "ccc"])?;
    moved_to(stack.forward()?, "aaa")?;
    moved_to(stack.forward()?, "bbb")?;
    popped(stack, "bbb")?;
    current_is(stack, Some("aaa"))?;
    moved_to(stack.back()?, "ccc")?;
    popped(stack, "ccc")?;
    current_is(stack, Some("aaa"))?;
    stack.push(b("ddd")?)?;
    current_is(stack, Some("ddd"))?;
    moved_to(stack.forward()?, "aaa")
}

fn popping_from_head(stack: &mut RingStack) -> Result<()> {
    push_all(stack, &["aaa", "bbb", "ccc"])?;
    moved_to(stack.back()?, "bbb")?;
    moved_to(stack.back()?, "aaa")?;
    popped(stack, "aaa")?;
    current_is(stack, Some("ccc"))
}

fn move_in_empty_ring(stack: &mut RingStack) -> Result<()> {
    ensure!(stack.forward()?.is_none(), "forward on empty ring moved");
    ensure!(stack.back()?.is_none(), "back on empty ring moved");
    ensure!(stack.position().is_none(), "empty ring has a position");
    Ok(())
}

fn move_in_singleton_ring(stack: &mut RingStack) -> Result<()> {
    stack.push(b("aaa")?)?;
    moved_to(stack.forward()?, "aaa")?;
    moved_to(stack.back()?, "aaa")
}

fn state_survives_reload(stack: &mut RingStack) -> Result<()> {
    push_all(stack, &["aaa", "bbb"])?;
    stack.back()?;

    let Some(path) = stack.store().path().map(|p| p.to_path_buf()) else {
        bail!("self-test store has no backing file");
    };
    let (store, failure) = StateStore::open(&path);
    if let Some(e) = failure {
        bail!("reload failed: {e}");
    }

    let reloaded = RingStack::new(store, stack.root());
    ensure!(
        reloaded.entries() == stack.entries(),
        "ring changed across reload"
    );
    current_is(&reloaded, Some("aaa"))
}
