//! Provider listing.
//!
//! Shows the matcher order, the names each matcher claims and where its
//! credential comes from. Isolates display concerns from the resolver.

use colored::Colorize;

use super::kind::ProviderKind;
use super::resolve::Resolver;

/// One row of the provider listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherInfo {
    pub position: usize,
    pub provider: ProviderKind,
    pub patterns: &'static [&'static str],
    pub credential: Option<&'static str>,
}

impl MatcherInfo {
    /// Human-readable description of which identifiers the matcher takes.
    pub fn accepts(&self) -> String {
        match self.provider {
            ProviderKind::Azure => "any name without '/' (needs an endpoint override)".into(),
            ProviderKind::AzureOpenAI => {
                "any name without '/' (needs AZURE_OPENAI_ENDPOINT)".into()
            }
            ProviderKind::OpenRouter => "any name (needs an OpenRouter key)".into(),
            ProviderKind::Dummy => "exactly \"dummy\"".into(),
            _ => self
                .patterns
                .iter()
                .map(|p| format!("{p}*"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Describes the resolver's matchers in resolution order.
pub fn describe(resolver: &Resolver) -> Vec<MatcherInfo> {
    resolver
        .matchers()
        .enumerate()
        .map(|(i, m)| MatcherInfo {
            position: i + 1,
            provider: m.kind(),
            patterns: m.patterns(),
            credential: m.kind().api_key_var(),
        })
        .collect()
}

/// Prints the listing to stdout.
pub fn print_providers(resolver: &Resolver) {
    println!("Providers, in resolution order:\n");
    for info in describe(resolver) {
        let credential = info
            .credential
            .map(|v| format!("  [{v}]"))
            .unwrap_or_default();
        println!(
            "  {:>2}. {} {}{}",
            info.position,
            format!("{:<13}", info.provider.name()).bold(),
            info.accepts(),
            credential.dimmed()
        );
    }
}
