//! Ordered-fallback model resolution.
//!
//! The [`Resolver`] walks its matchers in order and returns the first client
//! any of them builds. A matcher that claims the identifier but fails is
//! recorded and skipped; only when the whole list is exhausted does an error
//! reach the caller.

use std::sync::Arc;

use super::error::{ProviderFailure, ResolveError};
use super::factory::{ClientFactory, RigClientFactory};
use super::matcher::{MatchContext, Matcher};
use super::registry::default_matchers;
use crate::chat::ChatModel;
use crate::config::Config;
use crate::env::{Environment, ProcessEnv};
use crate::request::ModelSource;

/// Turns model identifiers into ready-to-use chat clients.
///
/// Holds an immutable, ordered matcher list; safe to share across threads.
pub struct Resolver {
    matchers: Vec<Box<dyn Matcher>>,
    factory: Arc<dyn ClientFactory>,
    env: Arc<dyn Environment>,
}

impl Resolver {
    pub fn new(
        matchers: Vec<Box<dyn Matcher>>,
        factory: Arc<dyn ClientFactory>,
        env: Arc<dyn Environment>,
    ) -> Self {
        Self {
            matchers,
            factory,
            env,
        }
    }

    /// The default matcher order with real clients and the process
    /// environment.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            default_matchers(&config.provider),
            Arc::new(RigClientFactory),
            Arc::new(ProcessEnv),
        )
    }

    /// Matchers in the order they are tried.
    pub fn matchers(&self) -> impl Iterator<Item = &dyn Matcher> {
        self.matchers.iter().map(|m| m.as_ref())
    }

    /// Resolves `source` to a chat client.
    ///
    /// A prebuilt client is returned as is. A named request is offered to
    /// each matcher in turn; the first client built wins.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnrecognizedModel`] if no matcher claimed the
    /// identifier, or [`ResolveError::ResolutionFailed`] with every recorded
    /// construction failure if at least one matcher claimed it but none
    /// succeeded.
    pub fn resolve(
        &self,
        source: impl Into<ModelSource>,
    ) -> Result<Arc<dyn ChatModel>, ResolveError> {
        let request = match source.into() {
            ModelSource::Prebuilt(model) => return Ok(model),
            ModelSource::Named(request) => request,
        };
        let identifier = request.identifier();
        if identifier.is_empty() {
            return Err(ResolveError::UnrecognizedModel(String::new()));
        }

        let cx = MatchContext {
            env: self.env.as_ref(),
            factory: self.factory.as_ref(),
        };
        let mut failures = Vec::new();

        for matcher in &self.matchers {
            match matcher.try_match(&request, &cx) {
                Ok(Some(model)) => {
                    tracing::debug!(provider = %matcher.kind(), model = identifier, "resolved model");
                    return Ok(model);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(provider = %matcher.kind(), model = identifier, %error, "error loading model");
                    failures.push(ProviderFailure {
                        provider: matcher.kind(),
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            Err(ResolveError::UnrecognizedModel(identifier.to_string()))
        } else {
            Err(ResolveError::ResolutionFailed {
                identifier: identifier.to_string(),
                failures,
            })
        }
    }
}
