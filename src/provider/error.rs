//! Error types for client construction and model resolution.

use std::fmt;

use thiserror::Error;

use super::kind::ProviderKind;

/// Why a matcher that claimed an identifier could not build its client.
///
/// The resolver records these and moves on; they only reach the caller
/// inside [`ResolveError::ResolutionFailed`].
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("no API key for {provider}: pass one explicitly or set {var}")]
    MissingCredential {
        provider: ProviderKind,
        var: &'static str,
    },
    #[error("invalid `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },
    #[error(transparent)]
    Client(#[from] anyhow::Error),
}

/// A construction failure tagged with the provider that raised it.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: ProviderKind,
    pub error: ConstructionError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Returned by [`Resolver::resolve`](super::Resolver::resolve) when no client
/// could be produced.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No matcher claimed the identifier.
    #[error(
        "unrecognized model `{0}`: no provider handles this name. \
Check the spelling against the supported prefixes (`llmloader --providers` lists them)"
    )]
    UnrecognizedModel(String),
    /// At least one matcher claimed the identifier but failed to build it.
    #[error(
        "failed to load model `{identifier}`. Check that an API key is supplied as an argument, \
through the provider's environment variable, or with --api-key. Errors: {}",
        join_failures(.failures)
    )]
    ResolutionFailed {
        identifier: String,
        failures: Vec<ProviderFailure>,
    },
}

fn join_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
