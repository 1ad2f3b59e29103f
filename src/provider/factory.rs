//! Client construction seam.
//!
//! Matchers translate a [`ModelRequest`](crate::request::ModelRequest) into a
//! normalized [`ClientSpec`] or [`PipelineSpec`] and hand it to a
//! [`ClientFactory`]. [`RigClientFactory`] builds real clients; tests swap in a
//! factory that records specs instead.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value};

use super::error::ConstructionError;
use super::kind::ProviderKind;
use crate::chat::{
    AzureChat, ChatModel, ChatTemplate, HttpTextGenerator, RigChatModel, RigSettings,
    TextGenerator,
};
use crate::constants::OPENROUTER_DEFAULT_BASE_URL;
use crate::request::ModelRequest;

/// Which client implementation a [`ClientSpec`] targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    OpenAi,
    Anthropic,
    Gemini,
    XAi,
    Mistral,
    OpenRouter { base_url: String },
    AzureAi { endpoint: String },
    AzureOpenAi { endpoint: String, api_version: String },
}

/// Normalized parameters for a chat client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSpec {
    pub provider: ProviderKind,
    pub backend: Backend,
    pub model: String,
    pub api_key: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
    /// Pass-through request fields.
    pub options: Map<String, Value>,
}

impl ClientSpec {
    /// Copies the generation parameters out of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidOption`] for a negative or
    /// non-finite temperature or a zero token budget.
    pub fn from_request(
        provider: ProviderKind,
        backend: Backend,
        request: &ModelRequest,
        api_key: String,
    ) -> Result<Self, ConstructionError> {
        validate_generation(request)?;
        Ok(Self {
            provider,
            backend,
            model: request.identifier().to_string(),
            api_key,
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
            options: request.passthrough_options(),
        })
    }

    fn settings(&self) -> RigSettings {
        RigSettings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            additional_params: self.options.clone(),
        }
    }
}

/// Normalized parameters for a local text-generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSpec {
    pub model: String,
    pub token: Option<String>,
    pub base_url: String,
    pub template: ChatTemplate,
    pub temperature: Option<f64>,
    pub max_new_tokens: u64,
    pub repetition_penalty: f64,
    pub options: Map<String, Value>,
}

pub(crate) fn validate_generation(request: &ModelRequest) -> Result<(), ConstructionError> {
    if let Some(t) = request.temperature() {
        if !t.is_finite() || t < 0.0 {
            return Err(ConstructionError::InvalidOption {
                key: "temperature".into(),
                reason: format!("expected a non-negative number, got {t}"),
            });
        }
    }
    if request.max_tokens() == Some(0) {
        return Err(ConstructionError::InvalidOption {
            key: "max_tokens".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

/// Builds live clients from normalized specs.
pub trait ClientFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    fn build_chat(&self, spec: ClientSpec) -> Result<Arc<dyn ChatModel>>;

    /// # Errors
    ///
    /// Returns an error if the pipeline cannot be created.
    fn build_pipeline(&self, spec: PipelineSpec) -> Result<Arc<dyn TextGenerator>>;
}

/// The default factory: rig-core for vendor APIs, reqwest for Azure and
/// text-generation servers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RigClientFactory;

impl ClientFactory for RigClientFactory {
    fn build_chat(&self, spec: ClientSpec) -> Result<Arc<dyn ChatModel>> {
        tracing::debug!(provider = %spec.provider, model = %spec.model, "building chat client");
        let settings = spec.settings();
        let key = spec.api_key.as_str();
        let model = spec.model.as_str();

        let client: Arc<dyn ChatModel> = match &spec.backend {
            Backend::OpenAi => Arc::new(RigChatModel::openai(key, model, settings)?),
            Backend::Anthropic => Arc::new(RigChatModel::anthropic(key, model, settings)?),
            Backend::Gemini => Arc::new(RigChatModel::gemini(key, model, settings)?),
            Backend::XAi => Arc::new(RigChatModel::xai(key, model, settings)?),
            Backend::Mistral => Arc::new(RigChatModel::mistral(key, model, settings)?),
            Backend::OpenRouter { base_url } => {
                let custom = (base_url.as_str() != OPENROUTER_DEFAULT_BASE_URL)
                    .then_some(base_url.as_str());
                Arc::new(RigChatModel::openrouter(key, custom, model, settings)?)
            }
            Backend::AzureAi { endpoint } => Arc::new(
                AzureChat::inference(endpoint, model, key)?.with_generation(
                    spec.temperature,
                    spec.max_tokens,
                    spec.options.clone(),
                ),
            ),
            Backend::AzureOpenAi {
                endpoint,
                api_version,
            } => Arc::new(
                AzureChat::deployment(endpoint, model, api_version, key)?.with_generation(
                    spec.temperature,
                    spec.max_tokens,
                    spec.options.clone(),
                ),
            ),
        };
        Ok(client)
    }

    fn build_pipeline(&self, spec: PipelineSpec) -> Result<Arc<dyn TextGenerator>> {
        tracing::debug!(model = %spec.model, base_url = %spec.base_url, "building text-generation pipeline");
        let generator = HttpTextGenerator::new(&spec.base_url, spec.token, spec.template)?
            .with_sampling(spec.temperature, spec.max_new_tokens, spec.repetition_penalty)
            .with_parameters(spec.options);
        Ok(Arc::new(generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_request_copies_parameters() {
        let request = ModelRequest::new("gpt-4o")
            .with_temperature(0.7)
            .with_max_tokens(100u64)
            .with_endpoint("https://ignored.example")
            .with_option("seed", 7);
        let spec =
            ClientSpec::from_request(ProviderKind::OpenAI, Backend::OpenAi, &request, "key123".into())
                .unwrap();
        assert_eq!(spec.model, "gpt-4o");
        assert_eq!(spec.temperature, Some(0.7));
        assert_eq!(spec.max_tokens, Some(100));
        assert_eq!(spec.options.len(), 1);
        assert_eq!(spec.options["seed"], 7);
    }

    #[test]
    fn test_rejects_negative_temperature() {
        let request = ModelRequest::new("gpt-4o").with_temperature(-1.0);
        let err = ClientSpec::from_request(ProviderKind::OpenAI, Backend::OpenAi, &request, "k".into())
            .unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidOption { ref key, .. } if key == "temperature"));
    }

    #[test]
    fn test_rejects_zero_max_tokens() {
        let request = ModelRequest::new("claude-3").with_max_tokens(0u64);
        assert!(validate_generation(&request).is_err());
    }

    #[test]
    fn test_builds_azure_deployment_client() {
        let spec = ClientSpec {
            provider: ProviderKind::AzureOpenAI,
            backend: Backend::AzureOpenAi {
                endpoint: "https://acme.openai.azure.com".into(),
                api_version: "2024-10-21".into(),
            },
            model: "prod-gpt".into(),
            api_key: "k".into(),
            temperature: None,
            max_tokens: None,
            options: Map::new(),
        };
        let client = RigClientFactory.build_chat(spec).unwrap();
        assert_eq!(client.provider(), ProviderKind::AzureOpenAI);
        assert_eq!(client.model(), "prod-gpt");
    }
}
