//! Provider router — selects the correct generation provider based on config.
//!
//! Handles provider creation and lookup by name.

use std::collections::HashMap;
use std::sync::Arc;
use hookstudio_core::error::ProviderError;
use hookstudio_core::provider::Provider;
use crate::gemini::GeminiProvider;
use crate::openai_compat::OpenAiCompatProvider;

/// Routes generation requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }
}

/// Build one provider from its name, key and optional endpoint.
///
/// A name outside the well-known table needs an explicit `api_url`.
fn build_provider(
    name: &str,
    api_key: &str,
    api_url: Option<&str>,
    timeout_secs: u64,
) -> Result<Arc<dyn Provider>, ProviderError> {
    if name == "gemini" {
        let mut p = GeminiProvider::new(api_key, timeout_secs);
        if let Some(url) = api_url {
            p = p.with_base_url(url);
        }
        return Ok(Arc::new(p));
    }

    let base_url = api_url.or_else(|| default_base_url(name)).ok_or_else(|| {
        ProviderError::NotConfigured(format!(
            "unknown provider '{name}': set providers.{name}.api_url in config.toml"
        ))
    })?;
    Ok(Arc::new(OpenAiCompatProvider::new(name, base_url, api_key, timeout_secs)))
}

/// Build providers from configuration.
pub fn build_from_config(
    config: &hookstudio_config::AppConfig,
) -> Result<ProviderRouter, ProviderError> {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        router.register(
            name.clone(),
            build_provider(
                name,
                &api_key,
                provider_config.api_url.as_deref(),
                config.request_timeout_secs,
            )?,
        );
    }

    // Ensure the default provider exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        router.register(
            config.default_provider.clone(),
            build_provider(
                &config.default_provider,
                &api_key,
                None,
                config.request_timeout_secs,
            )?,
        );
    }

    Ok(router)
}

/// Base URL for well-known OpenAI-compatible providers.
fn default_base_url(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "openrouter" => Some("https://openrouter.ai/api/v1"),
        "openai" => Some("https://api.openai.com/v1"),
        "ollama" => Some("http://localhost:11434/v1"),
        "deepseek" => Some("https://api.deepseek.com/v1"),
        "groq" => Some("https://api.groq.com/openai/v1"),
        "together" => Some("https://api.together.xyz/v1"),
        "vllm" => Some("http://localhost:8000/v1"),
        _ => None,
    }
}
