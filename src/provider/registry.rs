//! The default, ordered matcher list.

use super::matcher::Matcher;
use super::matchers::{
    AnthropicMatcher, AzureMatcher, AzureOpenAiMatcher, DummyMatcher, GeminiMatcher,
    LlamaMatcher, MistralMatcher, OpenAiMatcher, OpenRouterMatcher, XaiMatcher,
};
use crate::config::ProviderConfig;
use crate::provider::ProviderKind;

/// Builds every matcher in resolution order, minus disabled providers.
///
/// Order matters: direct vendors come first, then `dummy`, then the gateways,
/// with OpenRouter last because it accepts any name.
pub fn default_matchers(providers: &ProviderConfig) -> Vec<Box<dyn Matcher>> {
    let entry = |kind: ProviderKind| providers.entry(kind).cloned();

    let all: Vec<Box<dyn Matcher>> = vec![
        Box::new(OpenAiMatcher::new(entry(ProviderKind::OpenAI))),
        Box::new(AnthropicMatcher::new(entry(ProviderKind::Anthropic))),
        Box::new(GeminiMatcher::new(entry(ProviderKind::Gemini))),
        Box::new(XaiMatcher::new(entry(ProviderKind::XAI))),
        Box::new(MistralMatcher::new(entry(ProviderKind::Mistral))),
        Box::new(LlamaMatcher::new(entry(ProviderKind::Llama))),
        Box::new(DummyMatcher),
        Box::new(AzureMatcher::new(entry(ProviderKind::Azure))),
        Box::new(AzureOpenAiMatcher::new(entry(ProviderKind::AzureOpenAI))),
        Box::new(OpenRouterMatcher::new(entry(ProviderKind::OpenRouter))),
    ];

    all.into_iter()
        .filter(|m| {
            let enabled = providers.is_enabled(m.kind());
            if !enabled {
                tracing::debug!(provider = %m.kind(), "provider disabled in config");
            }
            enabled
        })
        .collect()
}
