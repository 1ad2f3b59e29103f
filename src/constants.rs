//! Centralized constants for llmloader.
//!
//! Environment variable names, model-name prefixes, default URLs and default
//! generation parameters live here so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "llmloader";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "llmloader.toml";

/// Overrides the global config file location.
pub const CONFIG_PATH_VAR: &str = "LLMLOADER_CONFIG";

// --- CLI defaults ---

/// Model used by the CLI when neither `--model` nor the config names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Temperature used by the CLI when `--temperature` is omitted.
pub const DEFAULT_CLI_TEMPERATURE: f64 = 0.1;

// --- Endpoint override ---

/// Key in a request's extra options that carries an explicit endpoint.
pub const ENDPOINT_OPTION: &str = "endpoint";

/// Environment fallback for the endpoint override.
pub const CUSTOM_ENDPOINT_VAR: &str = "CUSTOM_ENDPOINT";

// --- Credentials ---

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const XAI_API_KEY_VAR: &str = "XAI_API_KEY";
pub const MISTRAL_API_KEY_VAR: &str = "MISTRAL_API_KEY";
pub const HF_AUTH_VAR: &str = "HF_AUTH";
pub const CUSTOM_API_KEY_VAR: &str = "CUSTOM_API_KEY";
pub const AZURE_OPENAI_API_KEY_VAR: &str = "AZURE_OPENAI_API_KEY";
pub const AZURE_OPENAI_ENDPOINT_VAR: &str = "AZURE_OPENAI_ENDPOINT";
pub const AZURE_OPENAI_API_VERSION_VAR: &str = "AZURE_OPENAI_API_VERSION";
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const OPENROUTER_API_URL_VAR: &str = "OPENROUTER_API_URL";

// --- Model-name prefixes ---

pub const OPENAI_PREFIXES: &[&str] = &["gpt", "o1-"];
pub const ANTHROPIC_PREFIXES: &[&str] = &["claude"];
pub const GEMINI_PREFIXES: &[&str] = &["gemini", "gemma"];
pub const XAI_PREFIXES: &[&str] = &["grok"];
pub const MISTRAL_PREFIXES: &[&str] = &[
    "mistral",
    "pixtral",
    "codestral",
    "ministral",
    "open-mistral",
];
pub const LLAMA_PREFIXES: &[&str] = &["meta-llama/Meta-Llama", "meta-llama/Llama"];

/// The only identifier the echo client answers to.
pub const DUMMY_MODEL: &str = "dummy";

// --- Provider defaults ---

/// Gemini is the one provider whose temperature is filled in when unset.
pub const GEMINI_DEFAULT_TEMPERATURE: f64 = 1.0;

/// Anthropic rejects requests without `max_tokens`.
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u64 = 4096;

/// Default OpenRouter API base URL.
pub const OPENROUTER_DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Azure OpenAI REST API version used when `AZURE_OPENAI_API_VERSION` is unset.
pub const AZURE_OPENAI_DEFAULT_API_VERSION: &str = "2024-10-21";

/// API version for Azure AI model inference endpoints.
pub const AZURE_AI_API_VERSION: &str = "2024-05-01-preview";

// --- Local inference ---

/// Default base URL for a local text-generation-inference server.
pub const LOCAL_INFERENCE_DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Repetition penalty applied to local text generation.
pub const LOCAL_REPETITION_PENALTY: f64 = 1.1;

/// Generation budget for local pipelines when `max_tokens` is unset.
pub const LOCAL_DEFAULT_MAX_NEW_TOKENS: u64 = 512;

/// End-of-turn markers for Llama 3 chat models.
pub const LLAMA_STOP_TOKENS: &[&str] = &["<|eot_id|>", "<|end_of_text|>"];
