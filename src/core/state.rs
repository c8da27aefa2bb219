//! core::state
//!
//! Persisted ring state shared by every repository.
//!
//! # Layout
//!
//! A single JSON document maps each repository root to its ring record:
//!
//! ```json
//! {
//!   "/home/me/src/project": {
//!     "ring": ["main", "feature-a", "feature-b"],
//!     "position": 2
//!   }
//! }
//! ```
//!
//! # Lifecycle
//!
//! The whole document is loaded once per invocation and written back in
//! full after each mutation. There is no locking: two processes writing the
//! same file race and the later writer wins.
//!
//! A file that is missing, unreadable or unparsable is treated as an empty
//! store. Saving, on the other hand, reports every failure.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::BranchName;

/// Errors from state storage operations.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse state file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to serialize ring state: {0}")]
    SerializeError(String),

    #[error("failed to write state file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The ring of one repository together with its cursor.
///
/// `position` is `None` exactly when `ring` is empty. The record itself does
/// not enforce this; [`crate::core::ring::RingStack`] does.
///
/// On load, entries that are not valid branch names are dropped one by one
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct RingRecord {
    /// Entries in visiting order.
    pub ring: Vec<BranchName>,
    /// Index of the current entry.
    pub position: Option<usize>,
}

/// A record as written on disk, before name validation.
#[derive(Deserialize)]
struct StoredRecord {
    #[serde(default)]
    ring: Vec<String>,
    #[serde(default)]
    position: Option<usize>,
}

impl From<StoredRecord> for RingRecord {
    fn from(stored: StoredRecord) -> Self {
        let current = stored.position.filter(|&p| p < stored.ring.len());

        let mut ring = Vec::with_capacity(stored.ring.len());
        let mut position = None;
        let mut valid_before_cursor = 0;

        for (i, raw) in stored.ring.into_iter().enumerate() {
            let Ok(name) = BranchName::new(raw) else {
                continue;
            };
            match current {
                Some(c) if i == c => position = Some(ring.len()),
                Some(c) if i < c => valid_before_cursor += 1,
                _ => {}
            }
            ring.push(name);
        }

        let len = ring.len();
        let position = match (position, current) {
            _ if len == 0 => None,
            (Some(p), _) => Some(p),
            // The current entry was invalid: fall back to the one before it.
            (None, Some(_)) => Some((valid_before_cursor + len - 1) % len),
            // Out-of-range cursors are left for reconciliation to repair.
            (None, None) => stored.position,
        };

        Self { ring, position }
    }
}

/// Every repository's record, keyed by repository root.
pub type PersistedState = BTreeMap<String, RingRecord>;

/// Owner of the on-disk state document.
///
/// A store is either backed by a file or purely in memory. The in-memory
/// flavor never touches the filesystem, which keeps ring tests hermetic.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    path: Option<PathBuf>,
    state: PersistedState,
}

impl StateStore {
    /// Open the store at `path`, falling back to an empty state.
    ///
    /// The second element carries the reason the file could not be used, if
    /// any. A missing file is not a failure.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<StateError>) {
        let path = path.into();
        let (state, failure) = match Self::load(&path) {
            Ok(state) => (state, None),
            Err(err) => (PersistedState::new(), Some(err)),
        };

        (
            Self {
                path: Some(path),
                state,
            },
            failure,
        )
    }

    /// Create a store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    fn load(path: &Path) -> Result<PersistedState, StateError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedState::new())
            }
            Err(e) => {
                return Err(StateError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(PersistedState::new());
        }

        serde_json::from_str(&contents).map_err(|e| StateError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All records currently held.
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Get the record for `root`, creating an empty one on first access.
    pub fn record_mut(&mut self, root: &str) -> &mut RingRecord {
        self.state.entry(root.to_string()).or_default()
    }

    /// Get the record for `root` without creating it.
    pub fn record(&self, root: &str) -> Option<&RingRecord> {
        self.state.get(root)
    }

    /// Serialize the whole state document.
    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| StateError::SerializeError(e.to_string()))
    }

    /// Write the whole state back to disk.
    ///
    /// Writes to a sibling temp file and renames it over the target, creating
    /// parent directories as needed. In-memory stores do nothing.
    pub fn save(&self) -> Result<(), StateError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = self.to_json()?;
        let write_error = |p: &Path, e: std::io::Error| StateError::WriteError {
            path: p.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(path, e))?;
        }

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| write_error(&temp_path, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| write_error(&temp_path, e))?;
        file.sync_all().map_err(|e| write_error(&temp_path, e))?;

        fs::rename(&temp_path, path).map_err(|e| write_error(path, e))?;

        Ok(())
    }
}
