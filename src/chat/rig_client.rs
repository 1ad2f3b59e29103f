//! Vendor chat clients backed by rig-core.
//!
//! Wraps the rig-core provider clients behind enum dispatch so the rest of
//! the crate only sees [`ChatModel`]. Agents are built per call; they are
//! cheap and carry the per-request system prompt.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::{Prompt, Usage};
use rig::message::Message as RigMessage;
use rig::providers::{anthropic, gemini, mistral, openai, openrouter, xai};
use serde_json::{Map, Value};

use super::{ChatModel, ChatResponse};
use crate::message::{Message, Role};
use crate::provider::ProviderKind;
use crate::usage::TokenUsage;

/// Internal enum wrapping provider-specific clients.
enum ClientKind {
    OpenAI(openai::Client),
    Anthropic(anthropic::Client),
    Gemini(gemini::Client),
    XAi(xai::Client),
    Mistral(mistral::Client),
    OpenRouter(openrouter::Client),
}

/// Generation settings applied to every agent this client builds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigSettings {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u64>,
    /// Provider-specific request fields, merged into the request body.
    pub additional_params: Map<String, Value>,
}

/// A vendor chat client ready to handle completion requests.
pub struct RigChatModel {
    provider: ProviderKind,
    client: ClientKind,
    model: String,
    settings: RigSettings,
}

/// Builds an agent from the given client, model, settings and optional
/// system prompt, then executes the block with the agent bound to `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $settings:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let mut builder = $client.agent($model);
        if let Some(sys) = $sys {
            builder = builder.preamble(sys);
        }
        if let Some(temperature) = $settings.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = $settings.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        if !$settings.additional_params.is_empty() {
            builder = builder.additional_params(Value::Object($settings.additional_params.clone()));
        }
        let $agent = builder.build();
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.client {
            ClientKind::OpenAI($client) => $body,
            ClientKind::Anthropic($client) => $body,
            ClientKind::Gemini($client) => $body,
            ClientKind::XAi($client) => $body,
            ClientKind::Mistral($client) => $body,
            ClientKind::OpenRouter($client) => $body,
        }
    };
}

impl RigChatModel {
    fn new(provider: ProviderKind, client: ClientKind, model: &str, settings: RigSettings) -> Self {
        Self {
            provider,
            client,
            model: model.to_string(),
            settings,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the rig-core client cannot be created.
    pub fn openai(api_key: &str, model: &str, settings: RigSettings) -> Result<Self> {
        let client = openai::Client::new(api_key).context("Failed to create OpenAI client")?;
        Ok(Self::new(ProviderKind::OpenAI, ClientKind::OpenAI(client), model, settings))
    }

    /// # Errors
    ///
    /// Returns an error if the rig-core client cannot be created.
    pub fn anthropic(api_key: &str, model: &str, settings: RigSettings) -> Result<Self> {
        let client =
            anthropic::Client::new(api_key).context("Failed to create Anthropic client")?;
        Ok(Self::new(
            ProviderKind::Anthropic,
            ClientKind::Anthropic(client),
            model,
            settings,
        ))
    }

    /// # Errors
    ///
    /// Returns an error if the rig-core client cannot be created.
    pub fn gemini(api_key: &str, model: &str, settings: RigSettings) -> Result<Self> {
        let client = gemini::Client::new(api_key).context("Failed to create Gemini client")?;
        Ok(Self::new(ProviderKind::Gemini, ClientKind::Gemini(client), model, settings))
    }

    /// # Errors
    ///
    /// Returns an error if the rig-core client cannot be created.
    pub fn xai(api_key: &str, model: &str, settings: RigSettings) -> Result<Self> {
        let client = xai::Client::new(api_key).context("Failed to create xAI client")?;
        Ok(Self::new(ProviderKind::XAI, ClientKind::XAi(client), model, settings))
    }

    /// # Errors
    ///
    /// Returns an error if the rig-core client cannot be created.
    pub fn mistral(api_key: &str, model: &str, settings: RigSettings) -> Result<Self> {
        let client = mistral::Client::new(api_key).context("Failed to create Mistral client")?;
        Ok(Self::new(ProviderKind::Mistral, ClientKind::Mistral(client), model, settings))
    }

    /// OpenRouter client. `base_url` replaces the public API URL when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the rig-core client cannot be created.
    pub fn openrouter(
        api_key: &str,
        base_url: Option<&str>,
        model: &str,
        settings: RigSettings,
    ) -> Result<Self> {
        let client = match base_url {
            Some(url) => openrouter::Client::builder()
                .api_key(api_key)
                .base_url(url.trim_end_matches('/').to_string())
                .build(),
            None => openrouter::Client::new(api_key),
        }
        .context("Failed to create OpenRouter client")?;
        Ok(Self::new(
            ProviderKind::OpenRouter,
            ClientKind::OpenRouter(client),
            model,
            settings,
        ))
    }

    pub fn settings(&self) -> &RigSettings {
        &self.settings
    }
}

#[async_trait]
impl ChatModel for RigChatModel {
    fn provider(&self) -> ProviderKind {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    /// System messages become the preamble, the last message is the prompt,
    /// and everything in between is chat history.
    async fn invoke(&self, messages: &[Message]) -> Result<ChatResponse> {
        let (preamble, prompt, history) = split_conversation(messages);

        let response = dispatch!(self, |client| {
            with_agent!(client, &self.model, self.settings, preamble.as_deref(), |agent| {
                let mut history = history.clone();
                let response = agent
                    .prompt(prompt.clone())
                    .with_history(&mut history)
                    .extended_details()
                    .await;
                response
            })
        })
        .with_context(|| format!("{} request for {} failed", self.provider, self.model))?;

        Ok(ChatResponse::text(response.output).with_usage(token_usage(&response.total_usage)))
    }
}

/// Converts rig's aggregated usage. Some providers leave the total at zero.
fn token_usage(usage: &Usage) -> TokenUsage {
    let total = match usage.total_tokens {
        0 => usage.input_tokens.saturating_add(usage.output_tokens),
        total => total,
    };
    TokenUsage::new(usage.input_tokens, usage.output_tokens, total)
}

/// Splits a conversation into (preamble, prompt, history) for a rig agent.
fn split_conversation(messages: &[Message]) -> (Option<String>, String, Vec<RigMessage>) {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(Message::text)
        .collect();
    let preamble = (!system.is_empty()).then(|| system.join("\n\n"));

    let turns: Vec<&Message> = messages.iter().filter(|m| m.role != Role::System).collect();
    let prompt = turns
        .last()
        .map(|m| m.text().to_string())
        .unwrap_or_default();

    let history = turns
        .iter()
        .take(turns.len().saturating_sub(1))
        .map(|m| match m.role {
            Role::Assistant => RigMessage::assistant(m.text()),
            _ => RigMessage::user(m.text()),
        })
        .collect();

    (preamble, prompt, history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_conversation() {
        let messages = [
            Message::system("be terse"),
            Message::user("hi"),
            Message::assistant("hello"),
            Message::user("how are you?"),
        ];
        let (preamble, prompt, history) = split_conversation(&messages);
        assert_eq!(preamble.as_deref(), Some("be terse"));
        assert_eq!(prompt, "how are you?");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_split_conversation_without_system() {
        let (preamble, prompt, history) = split_conversation(&[Message::user("only")]);
        assert!(preamble.is_none());
        assert_eq!(prompt, "only");
        assert!(history.is_empty());
    }

    #[test]
    fn test_openai_client_keeps_settings() {
        let settings = RigSettings {
            temperature: Some(0.7),
            max_tokens: Some(100),
            additional_params: Map::new(),
        };
        let model = RigChatModel::openai("key123", "gpt-4o", settings.clone()).unwrap();
        assert_eq!(model.provider(), ProviderKind::OpenAI);
        assert_eq!(model.model(), "gpt-4o");
        assert_eq!(model.settings(), &settings);
    }

    #[test]
    fn test_token_usage_from_rig() {
        let reported = Usage {
            input_tokens: 12,
            output_tokens: 30,
            total_tokens: 42,
            ..Default::default()
        };
        assert_eq!(token_usage(&reported), TokenUsage::new(12, 30, 42));

        let without_total = Usage {
            input_tokens: 5,
            output_tokens: 7,
            ..Default::default()
        };
        assert_eq!(token_usage(&without_total), TokenUsage::new(5, 7, 12));
        assert!(token_usage(&Usage::default()).is_empty());
    }
}
