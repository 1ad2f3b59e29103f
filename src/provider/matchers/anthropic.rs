//! Anthropic: `claude*` models.

use std::sync::Arc;

use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::{ANTHROPIC_API_KEY_VAR, ANTHROPIC_DEFAULT_MAX_TOKENS, ANTHROPIC_PREFIXES};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{Backend, ClientSpec};
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{has_prefix, require_api_key, yields_to_endpoint, MatchContext, Matcher};
use crate::request::ModelRequest;

#[derive(Debug, Default, Clone)]
pub struct AnthropicMatcher {
    entry: Option<ProviderEntry>,
}

impl AnthropicMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for AnthropicMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn patterns(&self) -> &'static [&'static str] {
        ANTHROPIC_PREFIXES
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !has_prefix(request.identifier(), ANTHROPIC_PREFIXES)
            || yields_to_endpoint(self.kind(), request, cx.env)
        {
            return Ok(None);
        }
        let api_key = require_api_key(
            self.kind(),
            ANTHROPIC_API_KEY_VAR,
            request,
            cx.env,
            self.entry.as_ref(),
        )?;
        let mut spec = ClientSpec::from_request(self.kind(), Backend::Anthropic, request, api_key)?;
        // The Messages API requires max_tokens.
        spec.max_tokens.get_or_insert(ANTHROPIC_DEFAULT_MAX_TOKENS);
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}
