//! Provider kind enumeration and credential variable mapping.
//!
//! Defines [`ProviderKind`], the identity of every matcher and every client
//! the resolver can hand out.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::constants::*;

/// Identifies which LLM back-end a matcher or client belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI (GPT and o1 models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
    /// Google Gemini and Gemma.
    Gemini,
    /// xAI (Grok models).
    XAI,
    /// Mistral AI and its model families.
    Mistral,
    /// Llama models served by a local text-generation server.
    Llama,
    /// Azure AI inference gateway, reached through an endpoint override.
    Azure,
    /// A fixed Azure OpenAI deployment configured through the environment.
    AzureOpenAI,
    /// OpenRouter (multi-provider gateway).
    OpenRouter,
    /// Echo client for smoke tests.
    Dummy,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 10] = [
        ProviderKind::OpenAI,
        ProviderKind::Anthropic,
        ProviderKind::Gemini,
        ProviderKind::XAI,
        ProviderKind::Mistral,
        ProviderKind::Llama,
        ProviderKind::Azure,
        ProviderKind::AzureOpenAI,
        ProviderKind::OpenRouter,
        ProviderKind::Dummy,
    ];

    /// Lowercase name used in config sections, logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::XAI => "xai",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Llama => "llama",
            ProviderKind::Azure => "azure",
            ProviderKind::AzureOpenAI => "azure_openai",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Dummy => "dummy",
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAI => Some(OPENAI_API_KEY_VAR),
            ProviderKind::Anthropic => Some(ANTHROPIC_API_KEY_VAR),
            ProviderKind::Gemini => Some(GOOGLE_API_KEY_VAR),
            ProviderKind::XAI => Some(XAI_API_KEY_VAR),
            ProviderKind::Mistral => Some(MISTRAL_API_KEY_VAR),
            ProviderKind::Llama => Some(HF_AUTH_VAR),
            ProviderKind::Azure => Some(CUSTOM_API_KEY_VAR),
            ProviderKind::AzureOpenAI => Some(AZURE_OPENAI_API_KEY_VAR),
            ProviderKind::OpenRouter => Some(OPENROUTER_API_KEY_VAR),
            ProviderKind::Dummy => None,
        }
    }

    /// Gateways route through an endpoint override instead of yielding to it.
    pub fn honors_endpoint_override(&self) -> bool {
        matches!(self, ProviderKind::Azure | ProviderKind::OpenRouter)
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    /// Matching is case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('-', "_");
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let supported: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.name()).collect();
                anyhow!(
                    "Unknown provider: {s}. Supported: {}",
                    supported.join(", ")
                )
            })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_names() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.name().parse::<ProviderKind>().unwrap(), kind);
        }
        assert_eq!("Azure-OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::AzureOpenAI);
    }

    #[test]
    fn test_unknown_provider_lists_supported() {
        let err = "cohere".parse::<ProviderKind>().unwrap_err().to_string();
        assert!(err.contains("Unknown provider: cohere"));
        assert!(err.contains("openrouter"));
    }

    #[test]
    fn test_only_gateways_honor_endpoint() {
        let gateways: Vec<_> = ProviderKind::ALL
            .into_iter()
            .filter(ProviderKind::honors_endpoint_override)
            .collect();
        assert_eq!(gateways, vec![ProviderKind::Azure, ProviderKind::OpenRouter]);
    }
}
