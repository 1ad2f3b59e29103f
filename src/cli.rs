//! Command-line interface for llmloader.
//!
//! One-shot: resolve a model from its name, send the prompt, print the reply.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use crate::config::Config;
use crate::constants::DEFAULT_CLI_TEMPERATURE;
use crate::provider::{listing, Resolver};
use crate::request::ModelRequest;
use crate::usage::{self, TokenUsage};

/// Top-level CLI structure for llmloader.
#[derive(Parser, Debug)]
#[command(
    name = "llmloader",
    version,
    about = "Send a prompt to any supported chat model, picked by name"
)]
pub struct Cli {
    /// The prompt to send
    pub prompt: Vec<String>,

    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u64>,

    /// API key for the selected provider (overrides environment and config)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Custom endpoint; routes the request through Azure or OpenRouter
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the full response, including token usage, as JSON
    #[arg(long)]
    pub all_results: bool,

    /// Print token usage after the reply
    #[arg(long)]
    pub count: bool,

    /// Accumulate token usage into this YAML file
    #[arg(long, value_name = "PATH")]
    pub usage_file: Option<PathBuf>,

    /// List providers in resolution order and exit
    #[arg(long)]
    pub providers: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the model request, filling gaps from `config`.
    pub fn request(&self, config: &Config) -> ModelRequest {
        let model = self.model.clone().unwrap_or_else(|| config.model.clone());
        let temperature = self
            .temperature
            .or(config.temperature)
            .unwrap_or(DEFAULT_CLI_TEMPERATURE);

        let mut request = ModelRequest::new(model)
            .with_temperature(temperature)
            .with_max_tokens(self.max_tokens.or(config.max_tokens));
        if let Some(key) = &self.api_key {
            request = request.with_api_key(key.as_str());
        }
        if let Some(endpoint) = &self.endpoint {
            request = request.with_endpoint(endpoint.as_str());
        }
        request
    }
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Runs one prompt end to end.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the model cannot be
/// resolved, the call fails or the usage record cannot be updated.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let resolver = Resolver::from_config(&config);

    if cli.providers {
        listing::print_providers(&resolver);
        return Ok(());
    }

    let prompt = cli.prompt.join(" ");
    if prompt.trim().is_empty() {
        anyhow::bail!("No prompt provided. Usage: llmloader \"your prompt here\" --model <MODEL>");
    }

    let request = cli.request(&config);
    let model = resolver.resolve(request)?;
    tracing::debug!(provider = %model.provider(), model = model.model(), "invoking");

    let response = model
        .invoke_prompt(&prompt)
        .await
        .with_context(|| format!("{} request failed", model.provider()))?;

    if cli.all_results {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.content);
    }

    let tokens = response.usage.unwrap_or_default();
    let usage_file = cli.usage_file.as_deref().or(config.usage_file.as_deref());
    let total = usage::record(tokens, usage_file)?;

    if cli.count {
        print_usage(tokens, usage_file.map(|_| total));
    }
    Ok(())
}

fn print_usage(usage: TokenUsage, cumulative: Option<TokenUsage>) {
    println!("{} {}", "tokens:".dimmed(), usage);
    if let Some(total) = cumulative {
        println!("{} {}", "cumulative:".dimmed(), total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llmloader").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_request_defaults() {
        let cli = parse_args(&["hello"]);
        let request = cli.request(&Config::default());
        assert_eq!(request.identifier(), "gpt-4o-mini");
        assert_eq!(request.temperature(), Some(0.1));
        assert_eq!(request.max_tokens(), None);
        assert_eq!(request.api_key(), None);
        assert_eq!(request.endpoint(), None);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            model: "claude-3-5-sonnet".into(),
            temperature: Some(0.4),
            max_tokens: Some(300),
            ..Config::default()
        };

        let from_config = parse_args(&["hi"]).request(&config);
        assert_eq!(from_config.identifier(), "claude-3-5-sonnet");
        assert_eq!(from_config.temperature(), Some(0.4));
        assert_eq!(from_config.max_tokens(), Some(300));

        let cli = parse_args(&[
            "hi",
            "-m",
            "dummy",
            "-t",
            "0.9",
            "--max-tokens",
            "50",
            "--api-key",
            "key123",
            "--endpoint",
            "https://gw.example",
        ]);
        let request = cli.request(&config);
        assert_eq!(request.identifier(), "dummy");
        assert_eq!(request.temperature(), Some(0.9));
        assert_eq!(request.max_tokens(), Some(50));
        assert_eq!(request.api_key(), Some("key123"));
        assert_eq!(request.endpoint(), Some("https://gw.example"));
    }

    #[test]
    fn test_prompt_words_are_collected() {
        let cli = parse_args(&["Write", "me", "a", "haiku", "--count"]);
        assert_eq!(cli.prompt.join(" "), "Write me a haiku");
        assert!(cli.count);
        assert!(!cli.all_results);
    }
}
