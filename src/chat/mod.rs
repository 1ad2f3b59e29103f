//! Chat model capability and its concrete clients.
//!
//! Everything the resolver returns implements [`ChatModel`]. The clients in
//! this module are what matchers construct (through a
//! [`ClientFactory`](crate::provider::ClientFactory)):
//!
//! - [`RigChatModel`]: vendor APIs via rig-core
//! - [`AzureChat`]: Azure OpenAI deployments and Azure AI endpoints over REST
//! - [`LlamaChat`]: chat adapter over a [`TextGenerator`] pipeline
//! - [`DummyChat`]: echoes the prompt back

mod azure;
mod dummy;
mod llama;
mod rig_client;
mod text_generation;

pub use azure::AzureChat;
pub use dummy::DummyChat;
pub use llama::LlamaChat;
pub use rig_client::{RigChatModel, RigSettings};
pub use text_generation::{
    render_chat_template, ChatTemplate, GenerationOptions, HttpTextGenerator, TextGenerator, Turn,
};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::message::Message;
use crate::provider::ProviderKind;
use crate::usage::TokenUsage;

/// The result of one chat invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    /// Text of the reply.
    pub content: String,
    /// Token counts, when the back-end reports them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

impl ChatResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// A ready-to-use chat-completion client.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// The provider that built this client.
    fn provider(&self) -> ProviderKind;

    /// Model or deployment name the client talks to.
    fn model(&self) -> &str;

    /// Sends a conversation and returns the model's reply.
    async fn invoke(&self, messages: &[Message]) -> Result<ChatResponse>;

    /// Sends a single user prompt.
    async fn invoke_prompt(&self, prompt: &str) -> Result<ChatResponse> {
        self.invoke(&[Message::user(prompt)]).await
    }
}

impl std::fmt::Debug for dyn ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ChatModel")
            .field(&format_args!("{}/{}", self.provider(), self.model()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_debug_shows_provider_and_model() {
        let model: Arc<dyn ChatModel> = Arc::new(DummyChat::new());
        assert_eq!(format!("{model:?}"), "ChatModel(dummy/dummy)");

        let failed: Result<Arc<dyn ChatModel>, &str> = Ok(model);
        assert_eq!(format!("{failed:?}"), "Ok(ChatModel(dummy/dummy))");
    }
}
