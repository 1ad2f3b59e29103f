//! The matcher contract and the helpers every matcher is built from.
//!
//! A matcher answers one question for one provider: is this identifier mine,
//! and if so, here is the client. Answering "not mine" must be cheap and free
//! of side effects, so the pattern test always comes before credential lookup
//! or construction.

use std::sync::Arc;

use super::error::ConstructionError;
use super::factory::ClientFactory;
use super::kind::ProviderKind;
use crate::chat::ChatModel;
use crate::config::ProviderEntry;
use crate::constants::CUSTOM_ENDPOINT_VAR;
use crate::env::Environment;
use crate::request::ModelRequest;

/// What a matcher may consult while deciding.
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    pub env: &'a dyn Environment,
    pub factory: &'a dyn ClientFactory,
}

/// A provider-specific model-name predicate plus client construction.
///
/// Matchers are built once and shared; they hold configuration but no
/// per-call state.
pub trait Matcher: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Identifier prefixes this matcher claims. Empty for gateways that accept
    /// any name.
    fn patterns(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns `Ok(None)` when the identifier is not this provider's, and a
    /// fully built client when it is.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] when the identifier matched but the
    /// client could not be built (missing credential, bad parameter, client
    /// init failure).
    fn try_match(
        &self,
        request: &ModelRequest,
        cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError>;
}

/// True if `identifier` starts with any of `prefixes`.
pub fn has_prefix(identifier: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| identifier.starts_with(p))
}

/// The endpoint override for this request: the explicit `endpoint` option,
/// else `CUSTOM_ENDPOINT`.
pub fn endpoint_override(request: &ModelRequest, env: &dyn Environment) -> Option<String> {
    request
        .endpoint()
        .map(str::to_string)
        .or_else(|| env.var(CUSTOM_ENDPOINT_VAR))
}

/// Whether a direct-vendor matcher must step aside for an endpoint override.
///
/// Emits a warning when it does. Gateways never yield.
pub fn yields_to_endpoint(kind: ProviderKind, request: &ModelRequest, env: &dyn Environment) -> bool {
    if kind.honors_endpoint_override() {
        return false;
    }
    match endpoint_override(request, env) {
        Some(endpoint) => {
            tracing::warn!(
                provider = %kind,
                %endpoint,
                "custom endpoint set, ignoring direct-vendor loaders except Azure/OpenRouter"
            );
            true
        }
        None => false,
    }
}

/// Credential lookup: explicit argument, then `var`, then the config entry.
pub fn resolve_api_key(
    explicit: Option<&str>,
    env: &dyn Environment,
    var: &str,
    entry: Option<&ProviderEntry>,
) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| env.var(var))
        .or_else(|| {
            entry
                .and_then(|e| e.api_key.clone())
                .filter(|k| !k.is_empty())
        })
}

/// [`resolve_api_key`], failing with [`ConstructionError::MissingCredential`].
///
/// # Errors
///
/// Returns an error if no source supplies a key.
pub fn require_api_key(
    kind: ProviderKind,
    var: &'static str,
    request: &ModelRequest,
    env: &dyn Environment,
    entry: Option<&ProviderEntry>,
) -> Result<String, ConstructionError> {
    resolve_api_key(request.api_key(), env, var, entry).ok_or(ConstructionError::MissingCredential {
        provider: kind,
        var,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    fn entry_with_key(key: &str) -> ProviderEntry {
        ProviderEntry {
            api_key: Some(key.into()),
            ..ProviderEntry::default()
        }
    }

    #[test]
    fn test_has_prefix() {
        assert!(has_prefix("gpt-4o", &["gpt", "o1-"]));
        assert!(has_prefix("o1-mini", &["gpt", "o1-"]));
        assert!(!has_prefix("o3-mini", &["gpt", "o1-"]));
        assert!(!has_prefix("chatgpt", &["gpt"]));
    }

    #[test]
    fn test_explicit_endpoint_beats_env() {
        let env = MapEnv::new().with(CUSTOM_ENDPOINT_VAR, "https://env.example");
        let request = ModelRequest::new("gpt-4o").with_endpoint("https://arg.example");
        assert_eq!(
            endpoint_override(&request, &env).as_deref(),
            Some("https://arg.example")
        );
        let bare = ModelRequest::new("gpt-4o");
        assert_eq!(
            endpoint_override(&bare, &env).as_deref(),
            Some("https://env.example")
        );
    }

    #[test]
    fn test_only_vendors_yield_to_endpoint() {
        let env = MapEnv::new().with(CUSTOM_ENDPOINT_VAR, "https://gw.example");
        let request = ModelRequest::new("gpt-4o");
        assert!(yields_to_endpoint(ProviderKind::OpenAI, &request, &env));
        assert!(yields_to_endpoint(ProviderKind::Llama, &request, &env));
        assert!(!yields_to_endpoint(ProviderKind::Azure, &request, &env));
        assert!(!yields_to_endpoint(ProviderKind::OpenRouter, &request, &env));
        assert!(!yields_to_endpoint(ProviderKind::OpenAI, &request, &MapEnv::new()));
    }

    #[test]
    fn test_api_key_precedence() {
        let env = MapEnv::new().with("OPENAI_API_KEY", "from-env");
        let entry = entry_with_key("from-config");

        assert_eq!(
            resolve_api_key(Some("explicit"), &env, "OPENAI_API_KEY", Some(&entry)).as_deref(),
            Some("explicit")
        );
        assert_eq!(
            resolve_api_key(None, &env, "OPENAI_API_KEY", Some(&entry)).as_deref(),
            Some("from-env")
        );
        assert_eq!(
            resolve_api_key(None, &MapEnv::new(), "OPENAI_API_KEY", Some(&entry)).as_deref(),
            Some("from-config")
        );
        assert_eq!(resolve_api_key(None, &MapEnv::new(), "OPENAI_API_KEY", None), None);
    }

    #[test]
    fn test_require_api_key_names_variable() {
        let err = require_api_key(
            ProviderKind::Anthropic,
            "ANTHROPIC_API_KEY",
            &ModelRequest::new("claude-3"),
            &MapEnv::new(),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }
}
