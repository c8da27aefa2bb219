//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$BRANCHRING_CONFIG` if set
//! 2. `<config dir>/branchring/config.toml` (see [`crate::core::paths`])
//!
//! # Example
//!
//! ```no_run
//! use branchring::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Timeout: {}s", config.timeout());
//! println!("Remote: {}", config.remote());
//! println!("State file: {}", config.state_file().display());
//! ```

pub mod schema;

pub use schema::GlobalConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths::RingPaths;

/// Seconds to wait for an interactive selection when nothing is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remote consulted when nothing is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Values read from the config file
    pub global: GlobalConfig,
    /// Storage locations
    paths: RingPaths,
    /// Path to the config file (if loaded)
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or holds
    /// invalid values. A missing config file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let paths = RingPaths::from_env()?;

        let explicit = std::env::var_os("BRANCHRING_CONFIG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let candidate = explicit.unwrap_or_else(|| paths.config_path());

        Self::load_from(paths, Some(&candidate))
    }

    /// Load configuration from `path` (if it exists), routing storage
    /// through `paths`.
    pub fn load_from(paths: RingPaths, path: Option<&Path>) -> Result<Self, ConfigError> {
        let (global, loaded_from) = match path {
            Some(path) if path.exists() => (Self::read_config(path)?, Some(path.to_path_buf())),
            _ => (GlobalConfig::default(), None),
        };

        global.validate()?;

        Ok(Self {
            global,
            paths,
            loaded_from,
        })
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Seconds to wait for an interactive selection.
    ///
    /// Defaults to 10.
    pub fn timeout(&self) -> u64 {
        self.global.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Remote whose tracking branches count as existing.
    ///
    /// Defaults to "origin".
    pub fn remote(&self) -> &str {
        self.global.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    /// File holding the ring state.
    ///
    /// Defaults to `<config dir>/branchring/rings.json`.
    pub fn state_file(&self) -> PathBuf {
        self.global
            .state_file
            .clone()
            .unwrap_or_else(|| self.paths.state_path())
    }

    /// Whether output may be colorized.
    ///
    /// Defaults to `true`.
    pub fn color(&self) -> bool {
        self.global.color.unwrap_or(true)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> RingPaths {
        RingPaths::new(temp.path().to_path_buf())
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let config = Config::load_from(paths(&temp), Some(&missing)).unwrap();

        assert_eq!(config.timeout(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.remote(), "origin");
        assert!(config.color());
        assert_eq!(
            config.state_file(),
            temp.path().join("branchring/rings.json")
        );
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            timeout = 2
            remote = "upstream"
            state_file = "/elsewhere/rings.json"
            color = false
            "#,
        )
        .unwrap();

        let config = Config::load_from(paths(&temp), Some(&config_path)).unwrap();

        assert_eq!(config.timeout(), 2);
        assert_eq!(config.remote(), "upstream");
        assert_eq!(config.state_file(), PathBuf::from("/elsewhere/rings.json"));
        assert!(!config.color());
        assert_eq!(config.loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "timeout = [").unwrap();

        let result = Config::load_from(paths(&temp), Some(&config_path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_value_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "remote = \"a/b\"").unwrap();

        let result = Config::load_from(paths(&temp), Some(&config_path));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
