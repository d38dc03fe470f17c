//! Error types for the HookStudio domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use thiserror::Error;

// --- Bounded context errors ---

/// A command was issued against state that cannot satisfy it.
///
/// These are raised before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required field is empty: {field}")]
    MissingField { field: &'static str },

    #[error("No finished result to take context from")]
    NoResult,

    #[error("Item {index} is out of range ({len} items parsed)")]
    ItemOutOfRange { index: usize, len: usize },

    #[error("Cannot carry context from {from} to {to}")]
    NotTransferable { from: String, to: String },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// The generation gateway gave up on a request.
///
/// Carries the underlying provider error for logging. It is never shown to
/// the user verbatim.
#[derive(Debug, Clone, Error)]
#[error("{mode} generation failed: {source}")]
pub struct GenerationFailure {
    pub mode: String,
    #[source]
    pub source: ProviderError,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure on key '{key}': {reason}")]
    Io { key: String, reason: String },

    #[error("Stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Failed to serialize value for '{key}': {reason}")]
    Serialization { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn generation_failure_keeps_source() {
        let err = GenerationFailure {
            mode: "hooks".into(),
            source: ProviderError::Network("connection reset".into()),
        };
        assert!(err.to_string().contains("hooks"));
        assert!(err.to_string().contains("connection reset"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_error_names_field() {
        let err = ValidationError::MissingField { field: "audience" };
        assert!(err.to_string().contains("audience"));
    }
}
