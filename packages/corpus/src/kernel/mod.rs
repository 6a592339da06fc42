//! Kernel module - infrastructure traits and their implementations.

pub mod ai;
pub mod content_api;
pub mod test_dependencies;
pub mod traits;

// Re-export AI client types
pub use openai_client::{OpenAIClient, StructuredOutput};

/// Default model for both synthesis calls.
pub const GPT_4O_MINI: &str = "gpt-4o-mini";

pub use ai::OpenAIStructuredAI;
pub use govuk_content_client::{ContentApiClient, ContentApiError, ContentItem};
pub use test_dependencies::{MockAI, MockContentApi, MockReply};
pub use traits::*;
