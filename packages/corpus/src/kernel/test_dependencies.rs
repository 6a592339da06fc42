// Mock implementations of the kernel traits for tests
//
// Both mocks record every call so tests can assert on what was requested.

use anyhow::Result;
use async_trait::async_trait;
use govuk_content_client::{ContentApiError, ContentItem};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{BaseAI, BaseContentApi, StructuredPrompt};

// =============================================================================
// Mock Content API
// =============================================================================

/// Scripted reply for one request.
#[derive(Debug, Clone)]
pub enum MockReply {
    Item(serde_json::Value),
    RateLimited,
    Status(u16),
}

/// Replies are queued per path; the last queued reply repeats.
/// Unknown paths answer 404.
#[derive(Clone, Default)]
pub struct MockContentApi {
    replies: Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful payload for a path.
    pub fn with_item(self, path: &str, payload: serde_json::Value) -> Self {
        self.with_reply(path, MockReply::Item(payload))
    }

    pub fn with_reply(self, path: &str, reply: MockReply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Get all paths that were requested, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    fn next_reply(&self, path: &str) -> Option<MockReply> {
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(path)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl BaseContentApi for MockContentApi {
    async fn fetch_content(&self, path: &str) -> govuk_content_client::Result<ContentItem> {
        self.calls.lock().unwrap().push(path.to_string());

        match self.next_reply(path) {
            Some(MockReply::Item(payload)) => Ok(ContentItem::new(path, payload)),
            Some(MockReply::RateLimited) => Err(ContentApiError::RateLimited {
                path: path.to_string(),
            }),
            Some(MockReply::Status(status)) => Err(ContentApiError::Api {
                path: path.to_string(),
                status,
                message: "mock error".to_string(),
            }),
            None => Err(ContentApiError::Api {
                path: path.to_string(),
                status: 404,
                message: "not found".to_string(),
            }),
        }
    }
}

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a generate_structured call
#[derive(Debug, Clone)]
pub struct StructuredCall {
    pub schema_name: String,
    pub user_prompt: String,
    pub max_tokens: Option<u32>,
}

/// Answers the rewrite and snippet schemas with canned JSON derived from the input.
#[derive(Clone)]
pub struct MockAI {
    snippets_per_article: usize,
    fail_when_contains: Arc<Mutex<Vec<String>>>,
    fail_schema: Option<String>,
    raw_override: Option<String>,
    calls: Arc<Mutex<Vec<StructuredCall>>>,
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            snippets_per_article: 2,
            fail_when_contains: Arc::new(Mutex::new(Vec::new())),
            fail_schema: None,
            raw_override: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of snippet pairs returned per article.
    pub fn with_snippets_per_article(mut self, count: usize) -> Self {
        self.snippets_per_article = count;
        self
    }

    /// Fail every call whose content contains `needle`.
    pub fn failing_on(self, needle: &str) -> Self {
        self.fail_when_contains
            .lock()
            .unwrap()
            .push(needle.to_string());
        self
    }

    /// Only fail calls for this schema (combined with `failing_on`).
    pub fn failing_schema(mut self, schema_name: &str) -> Self {
        self.fail_schema = Some(schema_name.to_string());
        self
    }

    /// Return this text verbatim for every call (e.g. to simulate schema violations).
    pub fn with_raw_response(mut self, raw: &str) -> Self {
        self.raw_override = Some(raw.to_string());
        self
    }

    pub fn calls(&self) -> Vec<StructuredCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Distinct contents the mock was asked about, in first-seen order.
    pub fn prompted_contents(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for call in self.calls() {
            if !seen.contains(&call.user_prompt) {
                seen.push(call.user_prompt);
            }
        }
        seen
    }

    fn should_fail(&self, prompt: &StructuredPrompt) -> bool {
        let schema_matches = self
            .fail_schema
            .as_ref()
            .map_or(true, |name| *name == prompt.schema_name);
        schema_matches
            && self
                .fail_when_contains
                .lock()
                .unwrap()
                .iter()
                .any(|needle| prompt.user_prompt.contains(needle.as_str()))
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn generate_structured(&self, prompt: StructuredPrompt) -> Result<String> {
        self.calls.lock().unwrap().push(StructuredCall {
            schema_name: prompt.schema_name.clone(),
            user_prompt: prompt.user_prompt.clone(),
            max_tokens: prompt.max_tokens,
        });

        if self.should_fail(&prompt) {
            anyhow::bail!("mock AI failure for {}", prompt.schema_name);
        }
        if let Some(raw) = &self.raw_override {
            return Ok(raw.clone());
        }

        let first_line = prompt.user_prompt.lines().next().unwrap_or_default();
        let response = match prompt.schema_name.as_str() {
            "SynthesisedText" => serde_json::json!({
                "poorly_written_article": format!("so like, {}", first_line),
            }),
            "ArticleSnippets" => {
                let snippets: Vec<_> = (0..self.snippets_per_article)
                    .map(|i| {
                        serde_json::json!({
                            "well_written_snippet": format!("{} ({})", first_line, i),
                            "badly_written_snippet":
                                format!("{} ({})!!!", first_line.to_uppercase(), i),
                        })
                    })
                    .collect();
                serde_json::json!({ "snippets": snippets })
            }
            other => anyhow::bail!("mock AI has no response for schema {}", other),
        };

        Ok(response.to_string())
    }
}
