//! Meta Llama models (`meta-llama/Meta-Llama*`, `meta-llama/Llama*`).

use std::sync::Arc;

use super::local::LocalInference;
use crate::chat::{ChatModel, ChatTemplate, LlamaChat};
use crate::config::ProviderEntry;
use crate::constants::LLAMA_PREFIXES;
use crate::provider::error::ConstructionError;
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{has_prefix, yields_to_endpoint, MatchContext, Matcher};
use crate::request::ModelRequest;

/// Loads Llama models through [`LocalInference`] and wraps the pipeline in
/// the Llama 3 chat adapter.
#[derive(Debug, Default, Clone)]
pub struct LlamaMatcher {
    local: LocalInference,
}

impl LlamaMatcher {
    pub fn new(entry: Option<ProviderEntry>) -> Self {
        Self {
            local: LocalInference::new(entry),
        }
    }
}

impl Matcher for LlamaMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Llama
    }

    fn patterns(&self) -> &'static [&'static str] {
        LLAMA_PREFIXES
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if !has_prefix(request.identifier(), LLAMA_PREFIXES)
            || yields_to_endpoint(self.kind(), request, cx.env)
        {
            return Ok(None);
        }
        let pipeline = self.local.load(request, cx, ChatTemplate::Llama3)?;
        Ok(Some(Arc::new(LlamaChat::new(pipeline, request.identifier()))))
    }
}
