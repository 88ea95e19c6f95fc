//! TOML storage for the tracker configuration.

use std::fs;
use std::path::Path;

use moyu_core::config::TrackerConfig;
use moyu_core::error::{MoyuError, Result};

use crate::paths::MoyuPaths;

/// Loads the configuration from the default path, `~/.config/moyu/config.toml`.
///
/// A missing or empty file yields the defaults; a file that exists but
/// cannot be read or parsed is an error (the user edited it, so silently
/// discarding it would lose their settings).
pub fn load_config() -> Result<TrackerConfig> {
    let path = MoyuPaths::config_file().map_err(|e| MoyuError::io(e.to_string()))?;
    load_config_from(&path)
}

/// Loads the configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<TrackerConfig> {
    if !path.exists() {
        return Ok(TrackerConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(TrackerConfig::default());
    }

    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
pub fn save_config(config: &TrackerConfig) -> Result<()> {
    let path = MoyuPaths::config_file().map_err(|e| MoyuError::io(e.to_string()))?;
    save_config_to(&path, config)
}

/// Saves the configuration to an explicit path.
pub fn save_config_to(path: &Path, config: &TrackerConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;
    Ok(())
}
