//! Chat-completion adapter for Llama 3 text-generation pipelines.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::text_generation::{GenerationOptions, TextGenerator, Turn};
use super::{ChatModel, ChatResponse};
use crate::constants::LLAMA_STOP_TOKENS;
use crate::message::{Message, Role};
use crate::provider::ProviderKind;

/// Presents a [`TextGenerator`] as a [`ChatModel`].
///
/// Messages are handed to the pipeline as role-tagged turns with the Llama 3
/// end-of-turn markers as stop sequences; the reply is the last assistant
/// turn the pipeline produced.
pub struct LlamaChat {
    pipeline: Arc<dyn TextGenerator>,
    model: String,
}

impl LlamaChat {
    pub fn new(pipeline: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            pipeline,
            model: model.into(),
        }
    }

    fn options() -> GenerationOptions {
        GenerationOptions {
            stop: LLAMA_STOP_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ChatModel for LlamaChat {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Llama
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<ChatResponse> {
        let turns: Vec<Turn> = messages
            .iter()
            .map(|m| Turn::new(m.role.as_str(), m.text()))
            .collect();

        let conversation = self.pipeline.generate(&turns, &Self::options()).await?;
        let reply = conversation
            .iter()
            .rev()
            .find(|t| t.role == Role::Assistant.as_str())
            .filter(|_| conversation.len() > turns.len())
            .context("pipeline did not generate an assistant turn")?;

        Ok(ChatResponse::text(strip_stop_tokens(&reply.content)))
    }
}

/// Cuts the reply at the first end-of-turn marker, if the server echoed one.
fn strip_stop_tokens(text: &str) -> String {
    let end = LLAMA_STOP_TOKENS
        .iter()
        .filter_map(|token| text.find(token))
        .min()
        .unwrap_or(text.len());
    text[..end].trim().to_string()
}
