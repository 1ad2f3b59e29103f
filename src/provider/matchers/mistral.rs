//! Mistral AI, including the Pixtral, Codestral and Ministral families.

use std::sync::Arc;

use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::{MISTRAL_API_KEY_VAR, MISTRAL_PREFIXES};
use crate::provider::error::ConstructionError;
use crate::provider::factory::{Backend, ClientSpec};
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{has_prefix, require_api_key, yields_to_endpoint, MatchContext, Matcher};
use crate::request::ModelRequest;

#[derive(Debug, Default, Clone)]
pub struct MistralMatcher {
    entry: Option<ProviderEntry>,
}

impl MistralMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self { entry }
    }
}

impl Matcher for MistralMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mistral
    }

    fn patterns(&self) -> &'static [&'static str] {
        MISTRAL_PREFIXES
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !has_prefix(request.identifier(), MISTRAL_PREFIXES)
            || yields_to_endpoint(self.kind(), request, cx.env)
        {
            return Ok(None);
        }
        let api_key = require_api_key(
            self.kind(),
            MISTRAL_API_KEY_VAR,
            request,
            cx.env,
            self.entry.as_ref(),
        )?;
        let spec = ClientSpec::from_request(self.kind(), Backend::Mistral, request, api_key)?;
        Ok(Some(cx.factory.build_chat(spec)?))
    }
}
