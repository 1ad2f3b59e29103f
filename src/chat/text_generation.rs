//! Text-generation pipelines for locally served models.
//!
//! A [`TextGenerator`] takes role-tagged turns and returns the conversation
//! extended by the generated assistant turn. [`HttpTextGenerator`] does this
//! against a text-generation-inference server's `/generate` route, rendering
//! the turns through a [`ChatTemplate`] first.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One role-tagged conversation turn, in the `{"role", "content"}` shape chat
/// templates consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

impl Turn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Prompt format used to flatten turns into model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatTemplate {
    /// `role: content` lines, ending with an open `assistant:` line.
    #[default]
    Plain,
    /// Llama 3 header/eot tokens.
    Llama3,
}

/// Per-call generation settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub stop: Vec<String>,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates the next assistant turn and returns the full conversation.
    async fn generate(&self, turns: &[Turn], options: &GenerationOptions) -> Result<Vec<Turn>>;
}

/// Renders `turns` with `template`, leaving the assistant turn open.
pub fn render_chat_template(template: ChatTemplate, turns: &[Turn]) -> String {
    let mut out = String::new();
    match template {
        ChatTemplate::Plain => {
            for turn in turns {
                out.push_str(&format!("{}: {}\n", turn.role, turn.content));
            }
            out.push_str("assistant:");
        }
        ChatTemplate::Llama3 => {
            out.push_str("<|begin_of_text|>");
            for turn in turns {
                out.push_str(&format!(
                    "<|start_header_id|>{}<|end_header_id|>\n\n{}<|eot_id|>",
                    turn.role,
                    turn.content.trim()
                ));
            }
            out.push_str("<|start_header_id|>assistant<|end_header_id|>\n\n");
        }
    }
    out
}

/// Pipeline backed by a text-generation-inference server.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    template: ChatTemplate,
    temperature: Option<f64>,
    max_new_tokens: u64,
    repetition_penalty: f64,
    extra_parameters: Map<String, Value>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: Map<String, Value>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

impl HttpTextGenerator {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<String>, template: ChatTemplate) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create text-generation HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            template,
            temperature: None,
            max_new_tokens: crate::constants::LOCAL_DEFAULT_MAX_NEW_TOKENS,
            repetition_penalty: crate::constants::LOCAL_REPETITION_PENALTY,
            extra_parameters: Map::new(),
        })
    }

    pub fn with_sampling(
        mut self,
        temperature: Option<f64>,
        max_new_tokens: u64,
        repetition_penalty: f64,
    ) -> Self {
        self.temperature = temperature;
        self.max_new_tokens = max_new_tokens;
        self.repetition_penalty = repetition_penalty;
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.extra_parameters = parameters;
        self
    }

    fn parameters(&self, options: &GenerationOptions) -> Map<String, Value> {
        let mut params = self.extra_parameters.clone();
        params.insert("max_new_tokens".into(), self.max_new_tokens.into());
        params.insert("repetition_penalty".into(), self.repetition_penalty.into());
        // TGI rejects a temperature of zero; greedy decoding is do_sample=false.
        match self.temperature.filter(|t| *t > 0.0) {
            Some(t) => {
                params.insert("temperature".into(), t.into());
                params.insert("do_sample".into(), true.into());
            }
            None => {
                params.insert("do_sample".into(), false.into());
            }
        }
        if !options.stop.is_empty() {
            params.insert("stop".into(), options.stop.clone().into());
        }
        params
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, turns: &[Turn], options: &GenerationOptions) -> Result<Vec<Turn>> {
        let inputs = render_chat_template(self.template, turns);
        let body = GenerateRequest {
            inputs: &inputs,
            parameters: self.parameters(options),
        };

        let mut request = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach text-generation server at {}", self.base_url))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("text-generation server returned {status}: {detail}");
        }
        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse text-generation response")?;

        let mut conversation = turns.to_vec();
        conversation.push(Turn::new("assistant", generated.generated_text));
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llama3_template() {
        let turns = [Turn::new("system", "be kind"), Turn::new("user", "hi")];
        let rendered = render_chat_template(ChatTemplate::Llama3, &turns);
        assert_eq!(
            rendered,
            "<|begin_of_text|>\
<|start_header_id|>system<|end_header_id|>\n\nbe kind<|eot_id|>\
<|start_header_id|>user<|end_header_id|>\n\nhi<|eot_id|>\
<|start_header_id|>assistant<|end_header_id|>\n\n"
        );
    }

    #[test]
    fn test_plain_template() {
        let rendered = render_chat_template(ChatTemplate::Plain, &[Turn::new("user", "hi")]);
        assert_eq!(rendered, "user: hi\nassistant:");
    }

    #[test]
    fn test_greedy_parameters() {
        let generator = HttpTextGenerator::new("http://localhost:8080/", None, ChatTemplate::Llama3)
            .unwrap()
            .with_sampling(Some(0.0), 64, 1.1);
        let params = generator.parameters(&GenerationOptions {
            stop: vec!["<|eot_id|>".into()],
        });
        assert_eq!(params["do_sample"], Value::Bool(false));
        assert!(params.get("temperature").is_none());
        assert_eq!(params["max_new_tokens"], 64);
        assert_eq!(params["stop"][0], "<|eot_id|>");
        assert_eq!(generator.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_sampling_parameters() {
        let generator = HttpTextGenerator::new("http://localhost:8080", None, ChatTemplate::Plain)
            .unwrap()
            .with_sampling(Some(0.7), 100, 1.1);
        let params = generator.parameters(&GenerationOptions::default());
        assert_eq!(params["temperature"], 0.7);
        assert_eq!(params["do_sample"], Value::Bool(true));
        assert_eq!(params["repetition_penalty"], 1.1);
        assert!(params.get("stop").is_none());
    }
}
