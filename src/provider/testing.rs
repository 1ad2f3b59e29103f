//! Test doubles for resolver and matcher tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::error::ConstructionError;
use super::factory::{ClientFactory, ClientSpec, PipelineSpec};
use super::kind::ProviderKind;
use super::matcher::{MatchContext, Matcher};
use super::resolve::Resolver;
use super::registry::default_matchers;
use crate::chat::{ChatModel, ChatResponse, GenerationOptions, TextGenerator, Turn};
use crate::config::ProviderConfig;
use crate::env::MapEnv;
use crate::message::Message;
use crate::request::ModelRequest;

/// Chat client that answers with `provider:model`.
pub struct StubChat {
    pub provider: ProviderKind,
    pub model: String,
}

#[async_trait]
impl ChatModel for StubChat {
    fn provider(&self) -> ProviderKind {
        self.provider
    }
    fn model(&self) -> &str {
        &self.model
    }
    async fn invoke(&self, _messages: &[Message]) -> Result<ChatResponse> {
        Ok(ChatResponse::text(format!("{}:{}", self.provider, self.model)))
    }
}

/// Pipeline that replies `generated` to everything.
pub struct StubPipeline;

#[async_trait]
impl TextGenerator for StubPipeline {
    async fn generate(&self, turns: &[Turn], _options: &GenerationOptions) -> Result<Vec<Turn>> {
        let mut out = turns.to_vec();
        out.push(Turn::new("assistant", "generated"));
        Ok(out)
    }
}

/// Records every spec it is asked to build.
///
/// Any spec carrying `rejected_key` fails with `"bad key"`, standing in for
/// a client that refuses an invalid credential.
#[derive(Default)]
pub struct RecordingFactory {
    pub chats: Mutex<Vec<ClientSpec>>,
    pub pipelines: Mutex<Vec<PipelineSpec>>,
    rejected_key: Option<String>,
}

impl RecordingFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(key: &str) -> Arc<Self> {
        Arc::new(Self {
            rejected_key: Some(key.to_string()),
            ..Self::default()
        })
    }

    pub fn chat_specs(&self) -> Vec<ClientSpec> {
        self.chats.lock().unwrap().clone()
    }

    pub fn pipeline_specs(&self) -> Vec<PipelineSpec> {
        self.pipelines.lock().unwrap().clone()
    }

    /// The only chat spec built so far.
    pub fn single_chat(&self) -> ClientSpec {
        let specs = self.chat_specs();
        assert_eq!(specs.len(), 1, "expected exactly one client, got {specs:?}");
        specs.into_iter().next().unwrap()
    }
}

impl ClientFactory for RecordingFactory {
    fn build_chat(&self, spec: ClientSpec) -> Result<Arc<dyn ChatModel>> {
        self.chats.lock().unwrap().push(spec.clone());
        if self.rejected_key.as_deref() == Some(spec.api_key.as_str()) {
            return Err(anyhow!("bad key"));
        }
        Ok(Arc::new(StubChat {
            provider: spec.provider,
            model: spec.model,
        }))
    }

    fn build_pipeline(&self, spec: PipelineSpec) -> Result<Arc<dyn TextGenerator>> {
        self.pipelines.lock().unwrap().push(spec);
        Ok(Arc::new(StubPipeline))
    }
}

/// What a [`ScriptedMatcher`] does when asked.
#[derive(Clone, Copy)]
pub enum Script {
    Decline,
    Build,
    Fail,
}

/// Matcher with a fixed answer that counts how often it is consulted.
pub struct ScriptedMatcher {
    pub kind: ProviderKind,
    pub script: Script,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedMatcher {
    pub fn new(kind: ProviderKind, script: Script) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                kind,
                script,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Matcher for ScriptedMatcher {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn try_match(
        &self,
        request: &ModelRequest,
        _cx: &MatchContext<'_>,
    ) -> Result<Option<Arc<dyn ChatModel>>, ConstructionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Decline => Ok(None),
            Script::Build => Ok(Some(Arc::new(StubChat {
                provider: self.kind,
                model: request.identifier().to_string(),
            }))),
            Script::Fail => Err(anyhow!("{} exploded", self.kind).into()),
        }
    }
}

/// Default matchers over `env`, building through `factory`.
pub fn default_resolver(factory: Arc<RecordingFactory>, env: MapEnv) -> Resolver {
    Resolver::new(
        default_matchers(&ProviderConfig::default()),
        factory,
        Arc::new(env),
    )
}
