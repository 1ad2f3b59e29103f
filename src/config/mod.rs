//! Configuration types and path resolution for llmloader.
//!
//! Settings live as TOML at the platform's XDG config path (e.g.
//! `~/.config/llmloader/config.toml` on Linux), optionally overridden by an
//! `llmloader.toml` in the current project.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::{Config, ProviderConfig, ProviderEntry};

use anyhow::Result;

use crate::env::{Environment, ProcessEnv};

impl Config {
    /// Load config with precedence: project > global > defaults.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions(&ProcessEnv);
        Ok(config)
    }

    /// Parses TOML text and applies `{env:VAR}` substitution against `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a valid config.
    pub fn from_toml(text: &str, env: &dyn Environment) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.resolve_substitutions(env);
        Ok(config)
    }
}
