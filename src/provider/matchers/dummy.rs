//! The `dummy` echo model.

use std::sync::Arc;

use crate::chat::{ChatModel, DummyChat};
use crate::constants::DUMMY_MODEL;
use crate::provider::error::ConstructionError;
use crate::provider::kind::ProviderKind;
use crate::provider::matcher::{MatchContext, Matcher};
use crate::request::ModelRequest;

#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMatcher;

impl Matcher for DummyMatcher {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Dummy
    }

    fn patterns(&self) -> &'static [&'static str] {
        &[DUMMY_MODEL]
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        _cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        if request.identifier() != DUMMY_MODEL {
            return Ok(None);
        }
        Ok(Some(Arc::new(DummyChat::new())))
    }
}
