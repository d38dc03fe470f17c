//! Gemini provider implementation.
//!
//! Calls the Gemini REST API (`models/{model}:generateContent`) directly.
//! The system instruction travels in `systemInstruction`, the prompt as a
//! single user turn, and temperature in `generationConfig`.

use async_trait::async_trait;
use hookstudio_core::error::ProviderError;
use hookstudio_core::provider::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A provider backed by the Gemini HTTP API.
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client: crate::http_client(timeout_secs),
        }
    }

    /// Point the provider at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn to_api_request(request: &ProviderRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: request.system_instruction.clone(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

#[async_trait]
impl hookstudio_core::Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key is not set".into(),
            ));
        }

        let url = format!("{}/{}:generateContent", self.base_url, request.model);
        let body = Self::to_api_request(&request);

        debug!(provider = "gemini", model = %request.model, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(crate::transport_error)?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini returned error");
            return Err(crate::status_error(status, error_message(&error_body)));
        }

        let api_response: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse(format!(
                    "Failed to parse Gemini response: {e}"
                )))?;

        let usage = api_response.usage_metadata.as_ref().map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });
        let model = api_response
            .model_version
            .clone()
            .unwrap_or_else(|| request.model.clone());

        Ok(ProviderResponse {
            text: extract_text(api_response),
            usage,
            model,
        })
    }
}

/// Concatenate the text parts of the first candidate.
///
/// Returns `None` when there is no candidate or no non-empty text.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() { None } else { Some(text) }
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|w| {
            let message = w.error.message?;
            Some(match w.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {message}"),
                _ => message,
            })
        })
        .unwrap_or_else(|| body.to_string())
}

// --- Gemini API types (internal) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookstudio_core::Provider;

    fn request() -> ProviderRequest {
        ProviderRequest {
            model: "gemini-3-flash-preview".into(),
            system_instruction: "Você é um especialista".into(),
            prompt: "Gere 10 ganchos".into(),
            temperature: 0.8,
            max_tokens: None,
        }
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GeminiProvider::to_api_request(&request())).unwrap();
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "Você é um especialista"
        );
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Gere 10 ganchos");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn extracts_and_joins_text_parts() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "1. Foo\n"}, {"text": "2. Bar"}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.usage_metadata.as_ref().unwrap().total_token_count, 14);
        assert_eq!(extract_text(resp).as_deref(), Some("1. Foo\n2. Bar"));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_text(resp).is_none());

        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(resp).is_none());

        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#)
                .unwrap();
        assert!(extract_text(resp).is_none());
    }

    #[test]
    fn error_body_message_is_extracted() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "INVALID_ARGUMENT: API key not valid");
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let provider = GeminiProvider::new("", 5);
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn base_url_override_trims_slash() {
        let provider = GeminiProvider::new("k", 5).with_base_url("http://localhost:9000/models/");
        assert_eq!(provider.base_url, "http://localhost:9000/models");
        assert_eq!(provider.name(), "gemini");
    }
}
