//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing so that a typo surfaces as an
//! error at startup rather than as odd behavior later.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Longest interactive wait accepted, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// User configuration.
///
/// # Example
///
/// ```toml
/// timeout = 5
/// remote = "upstream"
/// state_file = "/home/me/.local/state/rings.json"
/// color = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Seconds to wait for a selection after `ring`
    pub timeout: Option<u64>,

    /// Remote whose tracking branches count as existing references
    pub remote: Option<String>,

    /// Where ring state is persisted
    pub state_file: Option<PathBuf>,

    /// Colorize output
    pub color: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(timeout) = self.timeout {
            if timeout > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidValue(format!(
                    "timeout {timeout}s exceeds the maximum of {MAX_TIMEOUT_SECS}s"
                )));
            }
        }

        if let Some(remote) = &self.remote {
            if remote.is_empty() || remote.contains('/') || remote.contains(char::is_whitespace)
            {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid remote name '{remote}'"
                )));
            }
        }

        if let Some(path) = &self.state_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "state_file cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
