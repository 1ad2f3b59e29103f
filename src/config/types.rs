//! Struct definitions and serde defaults for llmloader configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Root configuration, deserialized from `config.toml`.
///
/// Every field has a serde default so llmloader runs without a config file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Model the CLI resolves when `--model` is omitted.
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature the CLI uses when `--temperature` is omitted.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Token budget the CLI uses when `--max-tokens` is omitted.
    #[serde(default)]
    pub max_tokens: Option<u64>,
    /// YAML file that accumulates token usage across runs.
    #[serde(default)]
    pub usage_file: Option<PathBuf>,
    /// Per-provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Returns the default model identifier.
///
/// Used by serde's `#[serde(default)]` attribute during deserialization.
pub(super) fn default_model() -> String {
    crate::constants::DEFAULT_MODEL.to_string()
}

fn default_enabled() -> bool {
    true
}

/// Provider-specific configuration map.
///
/// Each field corresponds to one matcher. Providers without an entry are
/// enabled with no stored credential.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub openai: Option<ProviderEntry>,
    pub anthropic: Option<ProviderEntry>,
    pub gemini: Option<ProviderEntry>,
    pub xai: Option<ProviderEntry>,
    pub mistral: Option<ProviderEntry>,
    /// Local text-generation server for Llama models.
    pub llama: Option<ProviderEntry>,
    /// Azure AI inference gateway.
    pub azure: Option<ProviderEntry>,
    /// Fixed Azure OpenAI deployment.
    pub azure_openai: Option<ProviderEntry>,
    pub openrouter: Option<ProviderEntry>,
}

/// Settings for a single provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderEntry {
    /// Set to `false` to drop this provider from resolution entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// API key, consulted after the explicit argument and the environment.
    pub api_key: Option<String>,
    /// Base URL. Used by OpenRouter, the Azure OpenAI deployment and the
    /// local Llama server.
    pub base_url: Option<String>,
}

impl Default for ProviderEntry {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: None,
        }
    }
}

impl ProviderConfig {
    /// The entry for `kind`, if one is configured.
    pub fn entry(&self, kind: ProviderKind) -> Option<&ProviderEntry> {
        match kind {
            ProviderKind::OpenAI => self.openai.as_ref(),
            ProviderKind::Anthropic => self.anthropic.as_ref(),
            ProviderKind::Gemini => self.gemini.as_ref(),
            ProviderKind::XAI => self.xai.as_ref(),
            ProviderKind::Mistral => self.mistral.as_ref(),
            ProviderKind::Llama => self.llama.as_ref(),
            ProviderKind::Azure => self.azure.as_ref(),
            ProviderKind::AzureOpenAI => self.azure_openai.as_ref(),
            ProviderKind::OpenRouter => self.openrouter.as_ref(),
            ProviderKind::Dummy => None,
        }
    }

    /// Providers are enabled unless their entry says otherwise.
    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        self.entry(kind).map_or(true, |e| e.enabled)
    }

    pub(super) fn entries_mut(&mut self) -> [&mut Option<ProviderEntry>; 9] {
        [
            &mut self.openai,
            &mut self.anthropic,
            &mut self.gemini,
            &mut self.xai,
            &mut self.mistral,
            &mut self.llama,
            &mut self.azure,
            &mut self.azure_openai,
            &mut self.openrouter,
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: None,
            max_tokens: None,
            usage_file: None,
            provider: ProviderConfig::default(),
        }
    }
}
