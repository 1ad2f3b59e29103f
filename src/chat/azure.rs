//! Azure chat-completion clients over REST.
//!
//! Both Azure flavours speak the OpenAI chat-completions wire format and
//! differ only in URL shape:
//!
//! - Azure OpenAI: `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`,
//!   where the deployment name is the model
//! - Azure AI inference gateway: `{endpoint}/chat/completions?api-version=...`,
//!   with the model named in the request body

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ChatModel, ChatResponse};
use crate::message::Message;
use crate::provider::ProviderKind;
use crate::usage::TokenUsage;

/// A chat client for an Azure-hosted model.
#[derive(Debug, Clone)]
pub struct AzureChat {
    provider: ProviderKind,
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    /// Sent in the body; the deployment route already names the model.
    send_model: bool,
    temperature: Option<f64>,
    max_tokens: Option<u64>,
    extra: Map<String, Value>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AzureChat {
    /// Client for a fixed Azure OpenAI deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn deployment(
        endpoint: &str,
        deployment: &str,
        api_version: &str,
        api_key: &str,
    ) -> Result<Self> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            endpoint.trim_end_matches('/'),
            deployment,
            api_version
        );
        Self::new(ProviderKind::AzureOpenAI, url, api_key, deployment, false)
    }

    /// Client for a model behind an Azure AI inference endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn inference(endpoint: &str, model: &str, api_key: &str) -> Result<Self> {
        let url = format!(
            "{}/chat/completions?api-version={}",
            endpoint.trim_end_matches('/'),
            crate::constants::AZURE_AI_API_VERSION
        );
        Self::new(ProviderKind::Azure, url, api_key, model, true)
    }

    fn new(
        provider: ProviderKind,
        url: String,
        api_key: &str,
        model: &str,
        send_model: bool,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create Azure HTTP client")?;
        Ok(Self {
            provider,
            client,
            url,
            api_key: api_key.to_string(),
            model: model.to_string(),
            send_model,
            temperature: None,
            max_tokens: None,
            extra: Map::new(),
        })
    }

    pub fn with_generation(
        mut self,
        temperature: Option<f64>,
        max_tokens: Option<u64>,
        extra: Map<String, Value>,
    ) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self.extra = extra;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn body<'a>(&'a self, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: self.send_model.then_some(self.model.as_str()),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            extra: &self.extra,
        }
    }
}

fn parse_completion(completion: ChatCompletion) -> Result<ChatResponse> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .context("Azure response contained no choices")?
        .message
        .content
        .unwrap_or_default();
    let response = ChatResponse::text(content);
    Ok(match completion.usage {
        Some(usage) => response.with_usage(usage),
        None => response,
    })
}

#[async_trait]
impl ChatModel for AzureChat {
    fn provider(&self) -> ProviderKind {
        self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<ChatResponse> {
        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&self.body(messages))
            .send()
            .await
            .with_context(|| format!("Failed to reach Azure endpoint {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("Azure returned {status} for {}: {detail}", self.model);
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .context("Failed to parse Azure chat completion")?;
        parse_completion(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deployment_url() {
        let chat = AzureChat::deployment("https://acme.openai.azure.com/", "gpt4o-prod", "2024-10-21", "k")
            .unwrap();
        assert_eq!(
            chat.url(),
            "https://acme.openai.azure.com/openai/deployments/gpt4o-prod/chat/completions?api-version=2024-10-21"
        );
        assert_eq!(chat.provider(), ProviderKind::AzureOpenAI);
    }

    #[test]
    fn test_inference_body_names_model() {
        let chat = AzureChat::inference("https://acme.services.ai.azure.com/models", "deployed_model_name", "k")
            .unwrap()
            .with_generation(Some(0.7), Some(100), Map::from_iter([("top_p".to_string(), json!(0.9))]));
        let messages = [Message::user("hi")];
        let body = serde_json::to_value(chat.body(&messages)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "deployed_model_name",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.7,
                "max_tokens": 100,
                "top_p": 0.9,
            })
        );
    }

    #[test]
    fn test_deployment_body_omits_model() {
        let chat = AzureChat::deployment("https://acme.openai.azure.com", "prod", "v", "k").unwrap();
        let messages = [Message::user("hi")];
        let body = serde_json::to_value(chat.body(&messages)).unwrap();
        assert!(body.get("model").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_completion_with_legacy_usage() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 1, "total_tokens": 10},
        }))
        .unwrap();
        let response = parse_completion(completion).unwrap();
        assert_eq!(response.content, "hello");
        assert_eq!(response.usage, Some(TokenUsage::new(9, 1, 10)));
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let completion: ChatCompletion = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(parse_completion(completion).is_err());
    }
}
