//! Provider selection for llmloader.
//!
//! A [`Resolver`] holds an ordered list of [`Matcher`]s, one per back-end,
//! and hands back the first client a matcher builds for a model identifier.
//! Construction goes through a [`ClientFactory`] so matchers stay pure
//! translation from request to client parameters.

mod error;
mod factory;
mod kind;
pub mod listing;
mod matcher;
pub mod matchers;
mod registry;
mod resolve;

pub use error::{ConstructionError, ProviderFailure, ResolveError};
pub use factory::{Backend, ClientFactory, ClientSpec, PipelineSpec, RigClientFactory};
pub use kind::ProviderKind;
pub use matcher::{
    endpoint_override, has_prefix, require_api_key, resolve_api_key, yields_to_endpoint,
    MatchContext, Matcher,
};
pub use registry::default_matchers;
pub use resolve::Resolver;

#[cfg(test)]
mod testing;
