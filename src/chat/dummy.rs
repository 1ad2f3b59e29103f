//! Echo client for smoke tests.

use anyhow::Result;
use async_trait::async_trait;

use super::{ChatModel, ChatResponse};
use crate::constants::DUMMY_MODEL;
use crate::message::Message;
use crate::provider::ProviderKind;

/// Returns the last message's text verbatim. No network, no credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyChat;

impl DummyChat {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChatModel for DummyChat {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Dummy
    }

    fn model(&self) -> &str {
        DUMMY_MODEL
    }

    async fn invoke(&self, messages: &[Message]) -> Result<ChatResponse> {
        let prompt = messages.last().map(Message::text).unwrap_or_default();
        Ok(ChatResponse::text(prompt))
    }
}
