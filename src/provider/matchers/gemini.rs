//! Google: `gemini*` and `gemma*` models.

use std::sync::Arc;

use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::{GEMINI_DEFAULT_TEMPERATURE, GEMINI_PREFIXES, GOOGLE_API_KEY_VAR};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{Backend, ClientSpec};
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{has_prefix, require_api_key, yields_to_endpoint, MatchContext, Matcher};
use crate::request::ModelRequest;

#[derive(Debug, Default, Clone)]
pub struct GeminiMatcher {
    entry: Option<ProviderEntry>,
}

impl GeminiMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for GeminiMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn patterns(&self) -> &'static [&'static str] {
        GEMINI_PREFIXES
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !has_prefix(request.identifier(), GEMINI_PREFIXES)
            || yields_to_endpoint(self.kind(), request, cx.env)
        {
            return Ok(None);
        }
        let api_key = require_api_key(
            self.kind(),
            GOOGLE_API_KEY_VAR,
            request,
            cx.env,
            self.entry.as_ref(),
        )?;
        let mut spec = ClientSpec::from_request(self.kind(), Backend::Gemini, request, api_key)?;
        spec.temperature.get_or_insert(GEMINI_DEFAULT_TEMPERATURE);
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}
