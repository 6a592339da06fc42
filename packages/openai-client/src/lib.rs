//! Pure OpenAI REST API client
//!
//! A minimal client for schema-constrained chat completions with no
//! domain-specific logic.
//!
//! # Structured Output
//!
//! ```rust,ignore
//! use openai_client::{OpenAIClient, StructuredOutput, StructuredRequest};
//!
//! let client = OpenAIClient::new(api_key);
//! let schema = Rewrite::openai_schema();
//! let request = StructuredRequest::new("gpt-4o-mini", system_prompt, article, schema)
//!     .schema_name(Rewrite::openai_schema_name())
//!     .max_tokens(2048);
//! let json = client.structured_output(request).await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{OpenAIError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Structured output with JSON schema.
    ///
    /// Returns the raw JSON text of the first choice.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let error_text = response.text().await.unwrap_or_default();
            warn!(model = %request.model, "OpenAI rate limit hit");
            return Err(OpenAIError::RateLimited(error_text));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI structured output error");
            return Err(OpenAIError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                model = %request.model,
                schema = %request.response_format.json_schema.name,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                duration_ms = start.elapsed().as_millis(),
                "OpenAI structured completion"
            );
        }

        first_choice_content(chat_response)
    }
}

fn first_choice_content(response: types::ChatResponseRaw) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| OpenAIError::Parse("No choices in OpenAI response".into()))?;

    if let Some(refusal) = choice.message.refusal {
        return Err(OpenAIError::Refusal(refusal));
    }
    // A length-truncated completion cannot be valid JSON for the schema
    if let Some(reason) = choice.finish_reason.filter(|r| r == "length" || r == "content_filter") {
        return Err(OpenAIError::Truncated(reason));
    }

    choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| OpenAIError::Parse("Empty content in OpenAI response".into()))
}
