//! core::selection
//!
//! Parsing of the interactive ring selection.
//!
//! # Grammar
//!
//! ```text
//! selection := [ "d" | "D" ] index { whitespace index }
//! index     := positive decimal integer (1-based ring position)
//! ```
//!
//! Whitespace between the marker and the first index is optional, so `d2`,
//! `D 2 3` and `4` are all valid. Without the marker the selection is a jump
//! and only its first index matters.
//!
//! Anything else is a [`SelectionError`]. Callers treat every error as "the
//! user did not pick anything": the interactive prompt is a permissive
//! boundary and never fails a command.

use thiserror::Error;

use crate::core::types::BranchName;

/// Why a selection line was not acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Nothing but whitespace was entered.
    #[error("empty selection")]
    Empty,

    /// The line does not follow the selection grammar.
    #[error("malformed selection: {0:?}")]
    Malformed(String),

    /// An index does not name a ring entry.
    #[error("no ring entry {index} (ring has {len})")]
    OutOfRange {
        /// The 1-based index entered
        index: usize,
        /// Ring length at the time of lookup
        len: usize,
    },
}

/// A parsed selection, still in 1-based ring positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Switch to the entry at this position.
    Jump(usize),
    /// Remove the entries at these positions.
    Delete(Vec<usize>),
}

/// A selection resolved against a concrete ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Switch to this branch.
    Jump(BranchName),
    /// Remove these branches, in the order entered.
    Delete(Vec<BranchName>),
}

impl Selection {
    /// Parse one line of user input.
    ///
    /// # Example
    ///
    /// ```
    /// use branchring::core::selection::{Selection, SelectionError};
    ///
    /// assert_eq!(Selection::parse("2"), Ok(Selection::Jump(2)));
    /// assert_eq!(Selection::parse("D 1 3"), Ok(Selection::Delete(vec![1, 3])));
    /// assert!(matches!(Selection::parse("x"), Err(SelectionError::Malformed(_))));
    /// ```
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectionError::Empty);
        }

        let malformed = || SelectionError::Malformed(trimmed.to_string());

        let (delete, rest) = match trimmed.strip_prefix(|c: char| c.eq_ignore_ascii_case(&'d')) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let indices = rest
            .split_whitespace()
            .map(|token| {
                if !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed());
                }
                match token.parse::<usize>() {
                    Ok(0) => Err(SelectionError::OutOfRange { index: 0, len: 0 }),
                    Ok(n) => Ok(n),
                    Err(_) => Err(malformed()),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if indices.is_empty() {
            return Err(malformed());
        }

        if delete {
            Ok(Selection::Delete(indices))
        } else {
            Ok(Selection::Jump(indices[0]))
        }
    }

    /// Look the positions up in `ring`.
    ///
    /// Delete selections resolve every position before anything is removed,
    /// so later positions still refer to the ring as displayed.
    pub fn resolve(&self, ring: &[BranchName]) -> Result<Resolved, SelectionError> {
        let lookup = |index: usize| {
            index
                .checked_sub(1)
                .and_then(|i| ring.get(i))
                .cloned()
                .ok_or(SelectionError::OutOfRange {
                    index,
                    len: ring.len(),
                })
        };

        match self {
            Selection::Jump(index) => Ok(Resolved::Jump(lookup(*index)?)),
            Selection::Delete(indices) => {
                let mut names = Vec::with_capacity(indices.len());
                for &index in indices {
                    let name = lookup(index)?;
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                Ok(Resolved::Delete(names))
            }
        }
    }
}
