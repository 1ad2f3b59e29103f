//! File loading and merging for llmloader configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{default_model, Config, ProviderConfig};

impl Config {
    /// Loads the global config from `~/.config/llmloader/config.toml`.
    ///
    /// A missing file yields the defaults; nothing is written.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// Look for llmloader.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Self::load_from(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Merge project config over global config.
    /// Project values win when present; provider entries merge per provider.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        let p = project.provider;
        let g = global.provider;
        Config {
            model: if project.model != default_model() {
                project.model
            } else {
                global.model
            },
            temperature: project.temperature.or(global.temperature),
            max_tokens: project.max_tokens.or(global.max_tokens),
            usage_file: project.usage_file.or(global.usage_file),
            provider: ProviderConfig {
                openai: p.openai.or(g.openai),
                anthropic: p.anthropic.or(g.anthropic),
                gemini: p.gemini.or(g.gemini),
                xai: p.xai.or(g.xai),
                mistral: p.mistral.or(g.mistral),
                llama: p.llama.or(g.llama),
                azure: p.azure.or(g.azure),
                azure_openai: p.azure_openai.or(g.azure_openai),
                openrouter: p.openrouter.or(g.openrouter),
            },
        }
    }
}
