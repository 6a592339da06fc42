// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domains::synthesizer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{truncate_to_char_boundary, OpenAIClient, StructuredRequest};

use super::{BaseAI, StructuredPrompt};

/// OpenAI-backed structured generation with a fixed model.
#[derive(Clone)]
pub struct OpenAIStructuredAI {
    client: OpenAIClient,
    model: String,
}

impl OpenAIStructuredAI {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for OpenAIStructuredAI {
    async fn generate_structured(&self, prompt: StructuredPrompt) -> Result<String> {
        let mut request = StructuredRequest::new(
            &self.model,
            prompt.system_prompt,
            prompt.user_prompt,
            prompt.schema,
        )
        .schema_name(&prompt.schema_name);
        if let Some(max_tokens) = prompt.max_tokens {
            request = request.max_tokens(max_tokens);
        }

        let user_preview = truncate_to_char_boundary(&request.messages[1].content, 120).to_string();
        tracing::debug!(
            model = %self.model,
            schema = %prompt.schema_name,
            content_length = request.messages[1].content.len(),
            "Calling OpenAI structured output"
        );

        self.client
            .structured_output(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    schema = %prompt.schema_name,
                    content_preview = %user_preview,
                    "OpenAI structured output failed"
                );
                e
            })
            .with_context(|| format!("{} generation failed", prompt.schema_name))
    }
}
