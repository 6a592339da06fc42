// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to fetch and what to prompt for lives in the domains.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseContentApi)

use anyhow::Result;
use async_trait::async_trait;
use govuk_content_client::ContentItem;

// =============================================================================
// Content API Trait (Infrastructure - one GET per content path)
// =============================================================================

#[async_trait]
pub trait BaseContentApi: Send + Sync {
    /// Fetch the raw content item for a path.
    ///
    /// Rate limiting is surfaced as `ContentApiError::RateLimited` so callers
    /// can apply their own backoff.
    async fn fetch_content(&self, path: &str) -> govuk_content_client::Result<ContentItem>;
}

// =============================================================================
// AI Trait (Infrastructure - schema-constrained generation)
// =============================================================================

/// One structured generation call: fixed instructions, the content, and the
/// strict schema the answer must satisfy.
#[derive(Debug, Clone)]
pub struct StructuredPrompt {
    pub schema_name: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema: serde_json::Value,
    pub max_tokens: Option<u32>,
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Generate structured output with a JSON schema.
    /// Returns the JSON string conforming to the prompt's schema.
    async fn generate_structured(&self, prompt: StructuredPrompt) -> Result<String>;
}
