//! Unified path management for moyu's stored files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/moyu/              # Config directory (XDG on Linux/macOS)
//! ├── config.toml              # Stored defaults (salary, goal hours)
//! └── history.json             # Committed session records
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform configuration directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for moyu.
pub struct MoyuPaths;

impl MoyuPaths {
    /// Returns the moyu configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the config directory (e.g. `~/.config/moyu/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("moyu"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the history file.
    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("history.json"))
    }
}
