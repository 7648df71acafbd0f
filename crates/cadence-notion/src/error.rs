//! Notion error types.

use thiserror::Error;

/// Errors that can occur when talking to the Notion API.
#[derive(Error, Debug)]
pub enum NotionError {
    /// API error returned by Notion
    #[error("Notion API error ({status} {code}): {message}")]
    Api {
        /// HTTP status
        status: u16,
        /// Notion error code (e.g., "object_not_found")
        code: String,
        /// Human-readable message
        message: String,
    },

    /// Network/connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A field expected in a resource was missing or malformed
    #[error("Missing or malformed field: {0}")]
    MissingField(String),

    /// A property value could not be interpreted
    #[error("Unsupported property shape: {0}")]
    UnsupportedProperty(String),
}
