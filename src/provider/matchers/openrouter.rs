//! OpenRouter: the catch-all gateway.

use std::sync::Arc;

use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::{OPENROUTER_API_KEY_VAR, OPENROUTER_API_URL_VAR, OPENROUTER_DEFAULT_BASE_URL};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{Backend, ClientSpec};
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{endpoint_override, resolve_api_key, MatchContext, Matcher};
use crate::request::ModelRequest;

/// Accepts any identifier, as long as a credential is available.
///
/// Without a key the matcher stays out of the way, so unknown names still
/// report as unrecognized instead of as an OpenRouter credential failure.
/// An explicit request key counts as a credential, so a misspelled vendor
/// model sent with `--api-key` reaches OpenRouter rather than failing as
/// unrecognized.
#[derive(Debug, Default, Clone)]
pub struct OpenRouterMatcher {
    entry: Option<ProviderEntry>,
}

impl OpenRouterMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for OpenRouterMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        // Explicit key > OPENROUTER_API_KEY > config; any of them activates the gateway.
        let Some(api_key) = resolve_api_key(
            request.api_key(),
            cx.env,
            OPENROUTER_API_KEY_VAR,
            self.entry.as_ref(),
        ) else {
            tracing::debug!("openrouter has no credential, skipping");
            return Ok(None);
        };
        // Precedence: endpoint override > OPENROUTER_API_URL > config > public API.
        let base_url = endpoint_override(request, cx.env)
            .or_else(|| cx.env.var(OPENROUTER_API_URL_VAR))
            .or_else(|| self.entry.as_ref().and_then(|e| e.base_url.clone()))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| OPENROUTER_DEFAULT_BASE_URL.to_string());
        let spec = ClientSpec::from_request(
            self.kind(),
            Backend::OpenRouter { base_url },
            request,
            api_key,
        )?;
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}
