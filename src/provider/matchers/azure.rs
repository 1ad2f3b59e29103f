//! Azure: the AI inference gateway and the fixed Azure OpenAI deployment.
//!
//! Neither tests prefixes; both take the identifier as a deployment name and
//! reject names containing `/`.

use std::sync::Arc;

use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::{
    AZURE_OPENAI_API_KEY_VAR, AZURE_OPENAI_API_VERSION_VAR, AZURE_OPENAI_DEFAULT_API_VERSION,
    AZURE_OPENAI_ENDPOINT_VAR, CUSTOM_API_KEY_VAR,
};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{Backend, ClientSpec};
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{endpoint_override, require_api_key, MatchContext, Matcher};
use crate::request::ModelRequest;

fn is_deployment_name(identifier: &str) -> bool {
    !identifier.contains('/')
}

/// Routes any deployment name to the endpoint override.
///
/// Only reachable when an override is present, which also means every
/// direct vendor has already stepped aside.
#[derive(Debug, Default, Clone)]
pub struct AzureMatcher {
    entry: Option<ProviderEntry>,
}

impl AzureMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for AzureMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !is_deployment_name(request.identifier()) {
            return Ok(None);
        }
        let Some(endpoint) = endpoint_override(request, cx.env) else {
            return Ok(None);
        };
        let api_key = require_api_key(
            self.kind(),
            CUSTOM_API_KEY_VAR,
            request,
            cx.env,
            self.entry.as_ref(),
        )?;
        let spec = ClientSpec::from_request(
            self.kind(),
            Backend::AzureAi { endpoint },
            request,
            api_key,
        )?;
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}

/// A fixed Azure OpenAI resource, configured by `AZURE_OPENAI_ENDPOINT`
/// (or the config `base_url`). Inactive when neither is set.
#[derive(Debug, Default, Clone)]
pub struct AzureOpenAiMatcher {
    entry: Option<ProviderEntry>,
}

impl AzureOpenAiMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for AzureOpenAiMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureOpenAI
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !is_deployment_name(request.identifier()) {
            return Ok(None);
        }
        let configured = self.entry.as_ref().and_then(|e| e.base_url.clone());
        let Some(endpoint) = cx
            .env
            .var(AZURE_OPENAI_ENDPOINT_VAR)
            .or(configured)
            .filter(|e| !e.is_empty())
        else {
            return Ok(None);
        };
        let api_key = require_api_key(
            self.kind(),
            AZURE_OPENAI_API_KEY_VAR,
            request,
            cx.env,
            self.entry.as_ref(),
        )?;
        let api_version = cx
            .env
            .var(AZURE_OPENAI_API_VERSION_VAR)
            .unwrap_or_else(|| AZURE_OPENAI_DEFAULT_API_VERSION.to_string());
        let spec = ClientSpec::from_request(
            self.kind(),
            Backend::AzureOpenAi {
                endpoint,
                api_version,
            },
            request,
            api_key,
        )?;
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}
