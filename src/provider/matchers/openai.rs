//! OpenAI: `gpt*` and `o1-*` models.

use std::sync::Arc;

use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::{OPENAI_API_KEY_VAR, OPENAI_PREFIXES};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{Backend, ClientSpec};
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{has_prefix, require_api_key, yields_to_endpoint, MatchContext, Matcher};
use crate::request::ModelRequest;

#[derive(Debug, Default, Clone)]
pub struct OpenAiMatcher {
    entry: Option<ProviderEntry>,
}

impl OpenAiMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for OpenAiMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn patterns(&self) -> &'static [&'static str] {
        OPENAI_PREFIXES
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !has_prefix(request.identifier(), OPENAI_PREFIXES)
            || yields_to_endpoint(self.kind(), request, cx.env)
        {
            return Ok(None);
        }
        let api_key = require_api_key(
            self.kind(),
            OPENAI_API_KEY_VAR,
            request,
            cx.env,
            self.entry.as_ref(),
        )?;
        let spec = ClientSpec::from_request(self.kind(), Backend::OpenAi, request, api_key)?;
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}
