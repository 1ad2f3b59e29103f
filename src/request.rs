//! The per-call request a caller hands to the resolver.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::chat::ChatModel;
use crate::constants::ENDPOINT_OPTION;

/// A model identifier plus the parameters used to build its client.
///
/// The identifier is fixed at construction; everything else is optional and
/// set through the `with_*` builders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRequest {
    identifier: String,
    temperature: Option<f64>,
    api_key: Option<String>,
    max_tokens: Option<u64>,
    extra_options: Map<String, Value>,
}

impl ModelRequest {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: impl Into<Option<f64>>) -> Self {
        self.temperature = temperature.into();
        self
    }

    /// Sets the explicit API key. An empty string counts as no key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: impl Into<Option<u64>>) -> Self {
        self.max_tokens = max_tokens.into();
        self
    }

    /// Sets the endpoint override. An empty string counts as no override.
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            self
        } else {
            self.with_option(ENDPOINT_OPTION, endpoint)
        }
    }

    /// Adds a provider-specific option that is passed through to the client.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_options.insert(key.into(), value.into());
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn max_tokens(&self) -> Option<u64> {
        self.max_tokens
    }

    pub fn extra_options(&self) -> &Map<String, Value> {
        &self.extra_options
    }

    /// The explicit endpoint option, if it is a non-empty string.
    pub fn endpoint(&self) -> Option<&str> {
        self.extra_options
            .get(ENDPOINT_OPTION)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Extra options minus the keys the resolver itself consumes.
    pub fn passthrough_options(&self) -> Map<String, Value> {
        self.extra_options
            .iter()
            .filter(|(k, _)| k.as_str() != ENDPOINT_OPTION)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// What a caller can hand to the resolver: a name to resolve, or a client
/// that is already built and should be used as is.
#[derive(Clone)]
pub enum ModelSource {
    Named(ModelRequest),
    Prebuilt(Arc<dyn ChatModel>),
}

impl std::fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::Named(request) => f.debug_tuple("Named").field(request).finish(),
            ModelSource::Prebuilt(model) => f
                .debug_tuple("Prebuilt")
                .field(&format_args!("{}/{}", model.provider(), model.model()))
                .finish(),
        }
    }
}

impl From<ModelRequest> for ModelSource {
    fn from(request: ModelRequest) -> Self {
        ModelSource::Named(request)
    }
}

impl From<&str> for ModelSource {
    fn from(identifier: &str) -> Self {
        ModelSource::Named(ModelRequest::new(identifier))
    }
}

impl From<String> for ModelSource {
    fn from(identifier: String) -> Self {
        ModelSource::Named(ModelRequest::new(identifier))
    }
}

impl From<Arc<dyn ChatModel>> for ModelSource {
    fn from(model: Arc<dyn ChatModel>) -> Self {
        ModelSource::Prebuilt(model)
    }
}
