//! One matcher per provider.
//!
//! Direct vendors (OpenAI, Anthropic, Gemini, xAI, Mistral, Llama) claim
//! identifiers by prefix and step aside when an endpoint override is set.
//! Gateways (Azure, OpenRouter) accept arbitrary names and route through the
//! override instead.

mod anthropic;
mod azure;
mod dummy;
mod gemini;
mod llama;
mod local;
mod mistral;
mod openai;
mod openrouter;
mod xai;

pub use anthropic::AnthropicMatcher;
pub use azure::{AzureMatcher, AzureOpenAiMatcher};
pub use dummy::DummyMatcher;
pub use gemini::GeminiMatcher;
pub use llama::LlamaMatcher;
pub use local::LocalInference;
pub use mistral::MistralMatcher;
pub use openai::OpenAiMatcher;
pub use openrouter::OpenRouterMatcher;
pub use xai::XaiMatcher;
