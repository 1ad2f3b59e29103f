//! XDG path resolution for llmloader configuration.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;
use crate::constants::{APP_NAME, CONFIG_FILENAME, CONFIG_PATH_VAR};

impl Config {
    /// Returns the platform-specific configuration directory for llmloader.
    ///
    /// Returns `~/.config/llmloader/` on Linux (`XDG_CONFIG_HOME/llmloader`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the global configuration file.
    ///
    /// `LLMLOADER_CONFIG` wins when set; otherwise
    /// `~/.config/llmloader/config.toml` on Linux.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Config::config_dir`] fails.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_VAR).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }
}
