//! ui::ring_view
//!
//! Rendering of the ring for display.
//!
//! # Format
//!
//! One line per entry, numbered from 1 so the numbers can be typed back at
//! the selection prompt:
//!
//! ```text
//! 1) main                 =
//! 2) feature-auth         <2>1
//! 3) feature-ui
//! ```
//!
//! The trailing token is the branch's ahead/behind status against its
//! upstream (empty when it has none). The current entry is shown in green
//! when colors are enabled.

use std::collections::BTreeMap;

use owo_colors::OwoColorize;

use crate::core::types::BranchName;

/// Render `ring` with the cursor at `position`.
pub fn render(
    ring: &[BranchName],
    position: Option<usize>,
    statuses: &BTreeMap<BranchName, String>,
    color: bool,
) -> Vec<String> {
    ring.iter()
        .enumerate()
        .map(|(i, name)| {
            let status = statuses.get(name).map(String::as_str).unwrap_or("");
            let line = format!("{}) {:<20} {}", i + 1, name.as_str(), status)
                .trim_end()
                .to_string();

            if color && Some(i) == position {
                line.green().to_string()
            } else {
                line
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(names: &[&str]) -> Vec<BranchName> {
        names.iter().map(|n| BranchName::new(*n).unwrap()).collect()
    }

    #[test]
    fn numbers_from_one_with_status() {
        let names = ring(&["main", "feature"]);
        let mut statuses = BTreeMap::new();
        statuses.insert(names[0].clone(), "=".to_string());

        let lines = render(&names, Some(0), &statuses, false);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("1) {:<20} =", "main"));
        assert_eq!(lines[1], "2) feature");
    }

    #[test]
    fn current_line_is_green_only_with_color() {
        let names = ring(&["aaa", "bbb"]);
        let statuses = BTreeMap::new();

        let plain = render(&names, Some(1), &statuses, false);
        assert!(!plain[1].contains('\u{1b}'));

        let colored = render(&names, Some(1), &statuses, true);
        assert!(colored[1].starts_with("\u{1b}[32m"));
        assert!(!colored[0].contains('\u{1b}'));
    }

    #[test]
    fn long_names_are_not_truncated() {
        let long = "feature/a-really-long-branch-name";
        let lines = render(&ring(&[long]), Some(0), &BTreeMap::new(), false);
        assert_eq!(lines[0], format!("1) {long}"));
    }
}
