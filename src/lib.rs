//! llmloader: pick and build the right chat-completion client from a model name.
//!
//! Callers hand a model identifier (plus optional temperature, API key, token
//! budget and extra options) to a [`Resolver`]. The resolver offers it to an
//! ordered list of provider matchers; the first that recognizes the name and
//! can build a client wins.
//!
//! ```no_run
//! use llmloader::{Config, ModelRequest, Resolver};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let resolver = Resolver::from_config(&Config::load()?);
//! let model = resolver.resolve(ModelRequest::new("gpt-4o-mini").with_temperature(0.2))?;
//! let reply = model.invoke_prompt("Write me a haiku about love").await?;
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod cli;
pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
pub mod media;
pub mod message;
pub mod provider;
pub mod request;
pub mod usage;

pub use chat::{ChatModel, ChatResponse};
pub use config::Config;
pub use message::{Message, Role};
pub use provider::{ProviderKind, ResolveError, Resolver};
pub use request::{ModelRequest, ModelSource};
pub use usage::TokenUsage;
