//! core::paths
//!
//! Centralized path routing for branchring storage.
//!
//! # Storage Layout
//!
//! Everything lives under one per-user directory, `<config dir>/branchring/`:
//! - `config.toml` - User configuration
//! - `rings.json` - Ring state for every repository
//!
//! `<config dir>` is `$XDG_CONFIG_HOME` when set, otherwise the platform
//! configuration directory reported by `dirs`.
//!
//! **Hard rule:** no other module joins `"branchring"` onto a path.
//!
//! # Example
//!
//! ```
//! use branchring::core::paths::RingPaths;
//! use std::path::PathBuf;
//!
//! let paths = RingPaths::new(PathBuf::from("/home/me/.config"));
//!
//! assert_eq!(
//!     paths.state_path(),
//!     PathBuf::from("/home/me/.config/branchring/rings.json")
//! );
//! ```

use std::path::PathBuf;

use super::config::ConfigError;

/// Directory name under the user config dir.
const APP_DIR: &str = "branchring";

/// Centralized path routing for branchring storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingPaths {
    /// The user's configuration directory (e.g. `~/.config`).
    pub config_dir: PathBuf,
}

impl RingPaths {
    /// Route paths under an explicit configuration directory.
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Route paths under the current user's configuration directory.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoHomeDir`] if no configuration directory can be found.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(xdg)));
        }

        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(Self::new)
            .ok_or(ConfigError::NoHomeDir)
    }

    /// The branchring directory, `<config dir>/branchring`.
    pub fn app_dir(&self) -> PathBuf {
        self.config_dir.join(APP_DIR)
    }

    /// The configuration file, `<config dir>/branchring/config.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.app_dir().join("config.toml")
    }

    /// The default state file, `<config dir>/branchring/rings.json`.
    pub fn state_path(&self) -> PathBuf {
        self.app_dir().join("rings.json")
    }

}
