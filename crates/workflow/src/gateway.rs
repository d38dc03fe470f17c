//! Generation gateway — the single path from a mode and inputs to text.
//!
//! Builds the prompt, sends exactly one request to the configured provider
//! and hands back the text. No retries, no streaming.

use std::sync::Arc;

use hookstudio_config::AppConfig;
use hookstudio_core::error::GenerationFailure;
use hookstudio_core::provider::{Provider, ProviderRequest};
use hookstudio_core::studio::{InputSnapshot, Mode};
use tracing::{debug, error};

use crate::prompt;

/// Returned when the provider answers successfully but with no text.
pub const FALLBACK_TEXT: &str = "Não foi possível gerar o conteúdo. Tente novamente.";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Sends generation requests to one provider with fixed sampling settings.
pub struct GenerationGateway {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl GenerationGateway {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Gateway for `provider` using the model and sampling from `config`.
    ///
    /// A model set on the provider's own config section wins over
    /// `default_model`.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        let model = config
            .providers
            .get(&config.default_provider)
            .and_then(|p| p.default_model.clone())
            .unwrap_or_else(|| config.default_model.clone());

        Self::new(provider, model)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate content for `mode` from `input`.
    ///
    /// An empty or missing payload is not a failure: it yields
    /// [`FALLBACK_TEXT`]. Any provider error becomes a [`GenerationFailure`]
    /// and is logged here.
    pub async fn generate(
        &self,
        mode: Mode,
        input: &InputSnapshot,
    ) -> Result<String, GenerationFailure> {
        let prompt = prompt::build(mode, input);
        let request = ProviderRequest {
            model: self.model.clone(),
            system_instruction: prompt.system_instruction,
            prompt: prompt.user_prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            provider = self.provider.name(),
            model = %self.model,
            mode = %mode,
            "Sending generation request"
        );

        match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "Generation usage"
                    );
                }
                Ok(response
                    .text
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| FALLBACK_TEXT.to_string()))
            }
            Err(e) => {
                error!(provider = self.provider.name(), mode = %mode, error = %e, "Generation API error");
                Err(GenerationFailure {
                    mode: mode.to_string(),
                    source: e,
                })
            }
        }
    }
}
