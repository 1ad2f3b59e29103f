//! Shared construction for models served by a local text-generation server.

use std::sync::Arc;

use crate::chat::{ChatTemplate, TextGenerator};
use crate::config::ProviderEntry;
use crate::constants::{
    HF_AUTH_VAR, LOCAL_DEFAULT_MAX_NEW_TOKENS, LOCAL_INFERENCE_DEFAULT_BASE_URL,
    LOCAL_REPETITION_PENALTY,
};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{validate_generation, PipelineSpec};
use crate::provider::matcher::{resolve_api_key, MatchContext};
use crate::request::ModelRequest;

/// Builds text-generation pipelines for model families that run locally.
///
/// The access token is optional (`HF_AUTH`); public weights need none.
#[derive(Debug, Default, Clone)]
pub struct LocalInference {
    entry: Option<ProviderEntry>,
}

impl LocalInference {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }

    pub fn base_url(&self) -> &str {
        self.entry
            .as_ref()
            .and_then(|e| e.base_url.as_deref())
            .filter(|url| !url.is_empty())
            .unwrap_or(LOCAL_INFERENCE_DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns an error for invalid generation parameters or if the factory
    /// cannot build the pipeline.
    pub fn load(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
        template: ChatTemplate,
    ) -> Result<Arc<dyn TextGenerator>, ConstructionError> {
        validate_generation(request)?;
        let spec = PipelineSpec {
            model: request.identifier().to_string(),
            token: resolve_api_key(request.api_key(), cx.env, HF_AUTH_VAR, self.entry.as_ref()),
            base_url: self.base_url().to_string(),
            template,
            temperature: request.temperature(),
            max_new_tokens: request.max_tokens().unwrap_or(LOCAL_DEFAULT_MAX_NEW_TOKENS),
            repetition_penalty: LOCAL_REPETITION_PENALTY,
            options: request.passthrough_options(),
        };
        Ok(cx.factory.build_pipeline(spec)?)
    }
}
