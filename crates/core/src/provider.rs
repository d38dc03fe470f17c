//! Provider trait — the abstraction over text-generation backends.
//!
//! A Provider takes one system instruction plus one user prompt and returns
//! the generated text. Nothing is streamed and nothing is retried here.
//!
//! Implementations: Gemini, OpenAI-compatible endpoints, scripted test doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;

/// A single generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-3-flash-preview", "gpt-4o-mini")
    pub model: String,

    /// Persona and objective
    pub system_instruction: String,

    /// The user prompt
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.8
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated text. `None` when the provider answered without any.
    pub text: Option<String>,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

impl ProviderResponse {
    pub fn text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage: None,
            model: model.into(),
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The generation gateway calls `complete()` without knowing which backend
/// is behind it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Provider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse::text(request.model, request.prompt))
        }
    }

    #[test]
    fn request_temperature_defaults_when_missing() {
        let req: ProviderRequest = serde_json::from_str(
            r#"{"model":"m","system_instruction":"s","prompt":"p"}"#,
        )
        .unwrap();
        assert!((req.temperature - 0.8).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
    }

    #[tokio::test]
    async fn provider_is_object_safe() {
        let provider: Box<dyn Provider> = Box::new(Echo);
        assert_eq!(provider.name(), "echo");
        let resp = provider
            .complete(ProviderRequest {
                model: "m".into(),
                system_instruction: "s".into(),
                prompt: "hello".into(),
                temperature: 0.8,
                max_tokens: None,
            })
            .await
            .unwrap();
        assert_eq!(resp.text.as_deref(), Some("hello"));
    }
}
