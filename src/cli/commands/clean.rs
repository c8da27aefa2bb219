//! clean command - Drop ring entries whose branches are gone

use anyhow::{Context as _, Result};

use crate::engine::session::{reconciler, Session};
use crate::engine::Context;
use crate::git::ReferenceSource;
use crate::ui::output;

/// Prune the ring against a fresh listing of references, then show it.
pub fn clean(ctx: &Context, source: &dyn ReferenceSource) -> Result<()> {
    let verbosity = ctx.verbosity();
    let mut session = Session::prepare(ctx, source)?;

    let live = source
        .list_references()
        .context("Failed to list branches")?;
    output::debug(format!("{} live reference(s)", live.len()), verbosity);

    let removed = reconciler(ctx, source).prune(&mut session.stack, &live, &session.branch)?;
    if removed > 0 {
        output::debug(format!("Cleaned {removed} entry(ies)"), verbosity);
    }

    session.show(ctx, source);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::BranchName;
    use crate::git::mock::MockSource;
    use tempfile::TempDir;

    #[test]
    fn removes_deleted_branches() {
        let temp = TempDir::new().unwrap();
        let ctx = Context {
            quiet: true,
            state_file: temp.path().join("rings.json"),
            ..Default::default()
        };
        let source = MockSource::new(&["main", "feature", "fix"], "main");
        {
            let mut session = Session::prepare(&ctx, &source).unwrap();
            for name in ["feature", "fix"] {
                session.stack.push(BranchName::new(name).unwrap()).unwrap();
            }
            session.stack.push(BranchName::new("main").unwrap()).unwrap();
        }
        source.delete_branch("feature");

        clean(&ctx, &source).unwrap();

        let session = Session::prepare(&ctx, &source).unwrap();
        let names: Vec<&str> = session.stack.entries().iter().map(|b| b.as_str()).collect();
        assert_eq!(names, vec!["main", "fix"]);
        assert_eq!(session.stack.current().unwrap(), "main");
    }
}
