//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limited by the API (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// API error (non-2xx response, invalid request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model declined to produce the requested structure
    #[error("Model refused: {0}")]
    Refusal(String),

    /// Completion stopped before the structured output was complete
    #[error("Completion truncated (finish_reason: {0})")]
    Truncated(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
