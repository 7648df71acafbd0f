//! LLM error types.

use thiserror::Error;

/// Errors that can occur when interacting with LLM providers.
#[derive(Error, Debug)]
pub enum LLMError {
    /// API error from the provider
    #[error("API error: {0}")]
    ApiError(String),

    /// Network/connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Empty response from provider
    #[error("Empty response from LLM")]
    EmptyResponse,

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Model reply did not match the requested output schema
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// No provider has credentials configured
    #[error("No operational model provider; check your environment variables")]
    NoOperationalProvider,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
