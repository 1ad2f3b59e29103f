//! Multimodal payload formatting.
//!
//! Different back-ends expect base64 images in different message-part shapes.
//! [`format_media`] picks the shape from the client's provider.

use serde_json::{json, Value};
use thiserror::Error;

use crate::chat::ChatModel;
use crate::provider::ProviderKind;

/// Base64-encoded media plus its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaData {
    pub data: String,
    pub mime_type: String,
}

impl MediaData {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("No formatters found for data type: {0}")]
    UnsupportedType(String),
}

/// Builds the content part for `data` in the format `model` expects.
///
/// # Errors
///
/// Returns [`MediaError::UnsupportedType`] for anything other than `"image"`.
pub fn format_media(
    model: &dyn ChatModel,
    data_type: &str,
    data: &MediaData,
) -> Result<Value, MediaError> {
    match data_type {
        "image" => Ok(format_image(model.provider(), data)),
        other => Err(MediaError::UnsupportedType(other.to_string())),
    }
}

fn format_image(provider: ProviderKind, data: &MediaData) -> Value {
    match provider {
        ProviderKind::Azure => json!({
            "type": "image_url",
            "image_url": {
                "url": format!("data:{};base64,{}", data.mime_type, data.data),
            },
        }),
        _ => json!({
            "type": "image",
            "source_type": "base64",
            "data": data.data,
            "mime_type": data.mime_type,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatResponse, DummyChat};
    use crate::message::Message;
    use async_trait::async_trait;

    struct AzureStub;

    #[async_trait]
    impl ChatModel for AzureStub {
        fn provider(&self) -> ProviderKind {
            ProviderKind::Azure
        }
        fn model(&self) -> &str {
            "deployed"
        }
        async fn invoke(&self, _messages: &[Message]) -> anyhow::Result<ChatResponse> {
            Ok(ChatResponse::text(""))
        }
    }

    #[test]
    fn test_azure_uses_data_url() {
        let part = format_media(&AzureStub, "image", &MediaData::new("abc", "image/png")).unwrap();
        assert_eq!(part["type"], "image_url");
        assert_eq!(part["image_url"]["url"], "data:image/png;base64,abc");
    }

    #[test]
    fn test_default_format() {
        let part =
            format_media(&DummyChat::new(), "image", &MediaData::new("abc", "image/jpeg")).unwrap();
        assert_eq!(
            part,
            json!({"type": "image", "source_type": "base64", "data": "abc", "mime_type": "image/jpeg"})
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = format_media(&DummyChat::new(), "audio", &MediaData::new("", "")).unwrap_err();
        assert_eq!(err.to_string(), "No formatters found for data type: audio");
    }
}
