//! The two schema-constrained generation calls made per article.

use anyhow::{Context, Result};
use openai_client::StructuredOutput;
use tracing::debug;

use super::prompts::{REWRITE_PROMPT, SNIPPETS_PROMPT};
use crate::kernel::{BaseAI, StructuredPrompt};
use crate::models::{ArticleSnippets, SynthesisedText, SyntheticAugmentation};

pub const REWRITE_MAX_TOKENS: u32 = 2048;

async fn generate<T: StructuredOutput>(
    ai: &dyn BaseAI,
    system_prompt: &str,
    content: &str,
    max_tokens: Option<u32>,
) -> Result<T> {
    let schema_name = T::openai_schema_name();
    let prompt = StructuredPrompt {
        schema_name: schema_name.clone(),
        system_prompt: system_prompt.to_string(),
        user_prompt: content.to_string(),
        schema: T::openai_schema(),
        max_tokens,
    };

    let raw = ai.generate_structured(prompt).await?;
    debug!(schema = %schema_name, response_length = raw.len(), "Structured response received");

    serde_json::from_str(&raw)
        .with_context(|| format!("{} response did not match its schema", schema_name))
}

/// Degraded rewrite of the whole article.
pub async fn rewrite_poorly(ai: &dyn BaseAI, body: &str) -> Result<SynthesisedText> {
    generate(ai, REWRITE_PROMPT, body, Some(REWRITE_MAX_TOKENS)).await
}

/// Section-by-section well/badly written pairs.
pub async fn extract_snippets(ai: &dyn BaseAI, body: &str) -> Result<ArticleSnippets> {
    generate(ai, SNIPPETS_PROMPT, body, None).await
}

/// Both calls for one article. Either failing fails the whole augmentation.
pub async fn synthesize(ai: &dyn BaseAI, body: &str) -> Result<SyntheticAugmentation> {
    let rewrite = rewrite_poorly(ai, body).await?;
    let snippets = extract_snippets(ai, body).await?;
    Ok(SyntheticAugmentation::new(rewrite, snippets))
}
