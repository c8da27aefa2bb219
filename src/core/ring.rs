//! core::ring
//!
//! The ring stack: an ordered, duplicate-free list of branches with a cursor.
//!
//! # Model
//!
//! The ring is a circular list with a persistent visiting order rather than a
//! stack of frames. [`RingStack::push`] means "visit or insert next to the
//! cursor": a new branch lands right after whichever branch spawned it, so
//! sibling branches stay next to each other while cycling.
//!
//! # Invariants
//!
//! - `position` is `None` iff the ring is empty
//! - no entry appears twice
//! - after every mutation `position` is a valid index
//!
//! Every mutating operation persists through the owned [`StateStore`] before
//! returning.
//!
//! # Example
//!
//! ```
//! use branchring::core::ring::RingStack;
//! use branchring::core::state::StateStore;
//! use branchring::core::types::BranchName;
//!
//! let mut stack = RingStack::new(StateStore::in_memory(), "/repo");
//! for name in ["aaa", "bbb", "ccc"] {
//!     stack.push(BranchName::new(name).unwrap()).unwrap();
//! }
//!
//! assert_eq!(stack.back().unwrap().unwrap(), "bbb");
//! assert_eq!(stack.pop().unwrap(), "bbb");
//! assert_eq!(stack.current().unwrap(), "aaa");
//! ```

use thiserror::Error;

use crate::core::state::{RingRecord, StateError, StateStore};
use crate::core::types::BranchName;

/// Errors from ring operations.
#[derive(Debug, Error)]
pub enum RingError {
    /// `pop` was called with no current entry.
    #[error("No branches on the stack")]
    Empty,

    /// The mutation happened in memory but could not be stored.
    #[error(transparent)]
    Persist(#[from] StateError),
}

/// Ring of branches for one repository root.
#[derive(Debug)]
pub struct RingStack {
    store: StateStore,
    root: String,
}

impl RingStack {
    /// Bind the record for `root` inside `store`.
    ///
    /// Roots the store has never seen start with an empty ring.
    pub fn new(mut store: StateStore, root: impl Into<String>) -> Self {
        let root = root.into();
        store.record_mut(&root);
        Self { store, root }
    }

    /// The repository root this ring belongs to.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The backing store.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Give the store back, e.g. to bind another root.
    pub fn into_store(self) -> StateStore {
        self.store
    }

    fn record(&self) -> &RingRecord {
        static EMPTY: RingRecord = RingRecord {
            ring: Vec::new(),
            position: None,
        };
        self.store.record(&self.root).unwrap_or(&EMPTY)
    }

    fn record_mut(&mut self) -> &mut RingRecord {
        self.store.record_mut(&self.root)
    }

    /// Entries in ring order.
    pub fn entries(&self) -> &[BranchName] {
        &self.record().ring
    }

    /// The raw stored cursor.
    pub fn position(&self) -> Option<usize> {
        self.record().position
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// True if the ring holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// True if `name` is in the ring.
    pub fn contains(&self, name: &BranchName) -> bool {
        self.entries().contains(name)
    }

    /// Cursor index, if it points inside the ring.
    fn current_index(&self) -> Option<usize> {
        self.position().filter(|&p| p < self.len())
    }

    /// The entry under the cursor.
    ///
    /// A stored position past the end of the ring reads as `None`; it is not
    /// repaired here.
    pub fn current(&self) -> Option<&BranchName> {
        self.current_index().map(|i| &self.entries()[i])
    }

    /// Write the whole store back.
    pub fn save(&self) -> Result<(), StateError> {
        self.store.save()
    }

    /// Visit `name`, inserting it after the cursor if it is new.
    pub fn push(&mut self, name: BranchName) -> Result<(), RingError> {
        let record = self.record_mut();

        let new_position = match record.ring.iter().position(|b| *b == name) {
            Some(existing) => existing,
            None => {
                let at = record
                    .position
                    .map_or(0, |p| p + 1)
                    .min(record.ring.len());
                record.ring.insert(at, name);
                at
            }
        };
        record.position = Some(new_position);

        self.save()?;
        Ok(())
    }

    /// Remove and return the current entry.
    ///
    /// The cursor moves to the entry that preceded the removed one, wrapping
    /// to the new last entry when the first one is removed.
    ///
    /// # Errors
    ///
    /// [`RingError::Empty`] if there is no current entry.
    pub fn pop(&mut self) -> Result<BranchName, RingError> {
        let index = self.current_index().ok_or(RingError::Empty)?;

        let record = self.record_mut();
        let popped = record.ring.remove(index);
        record.position = step(index, -1, record.ring.len());

        self.save()?;
        Ok(popped)
    }

    /// Move the cursor one entry back, wrapping around.
    ///
    /// Returns `None` without touching anything if the ring is empty.
    pub fn back(&mut self) -> Result<Option<BranchName>, RingError> {
        self.rotate(-1)
    }

    /// Move the cursor one entry forward, wrapping around.
    ///
    /// Returns `None` without touching anything if the ring is empty.
    pub fn forward(&mut self) -> Result<Option<BranchName>, RingError> {
        self.rotate(1)
    }

    fn rotate(&mut self, delta: isize) -> Result<Option<BranchName>, RingError> {
        if self.is_empty() {
            return Ok(None);
        }

        let len = self.len();
        let from = self.position().unwrap_or(0);
        let record = self.record_mut();
        record.position = step(from, delta, len);

        self.save()?;
        Ok(self.current().cloned())
    }

    /// Remove `name` from the ring wherever it is.
    ///
    /// Removing the current entry behaves like [`RingStack::pop`]. Removing
    /// an entry before the cursor shifts the cursor down so it keeps naming
    /// the same branch. Returns false if `name` was not in the ring.
    pub fn remove(&mut self, name: &BranchName) -> Result<bool, RingError> {
        let Some(index) = self.entries().iter().position(|b| b == name) else {
            return Ok(false);
        };

        if Some(index) == self.current_index() {
            self.pop()?;
            return Ok(true);
        }

        let record = self.record_mut();
        record.ring.remove(index);
        record.position = match record.position {
            _ if record.ring.is_empty() => None,
            Some(p) if p > index => Some(p - 1),
            other => other,
        };

        self.save()?;
        Ok(true)
    }

    /// Keep only the entries for which `keep` returns true.
    ///
    /// Repeated names collapse onto their first occurrence. If the current
    /// entry survives the cursor follows it. Otherwise it lands on the
    /// closest surviving entry before it, wrapping like [`RingStack::pop`].
    /// Returns the number of entries left.
    pub fn retain<F>(&mut self, mut keep: F) -> Result<usize, RingError>
    where
        F: FnMut(&BranchName) -> bool,
    {
        let current = self.current_index();
        let record = self.record_mut();

        let mut survivors = Vec::with_capacity(record.ring.len());
        let mut new_position = None;
        let mut survivors_before_cursor = 0;

        for (i, name) in record.ring.drain(..).enumerate() {
            if !keep(&name) {
                continue;
            }
            if let Some(first) = survivors.iter().position(|s| *s == name) {
                if current == Some(i) {
                    new_position = Some(first);
                }
                continue;
            }
            match current {
                Some(c) if i == c => new_position = Some(survivors.len()),
                Some(c) if i < c => survivors_before_cursor += 1,
                _ => {}
            }
            survivors.push(name);
        }

        let len = survivors.len();
        record.position = match (new_position, current) {
            _ if len == 0 => None,
            (Some(p), _) => Some(p),
            (None, Some(_)) => step(survivors_before_cursor, -1, len),
            (None, None) => record.position.filter(|&p| p < len),
        };
        record.ring = survivors;

        self.save()?;
        Ok(len)
    }
}

/// Move `from` by `delta` positions around a ring of `len` entries.
fn step(from: usize, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    Some((from as isize + delta).rem_euclid(len) as usize)
}
