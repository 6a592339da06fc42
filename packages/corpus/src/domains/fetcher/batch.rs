//! Rate-limited batch querying of the Content API.
//!
//! Requests are issued one at a time. Each batch is padded to a minimum
//! wall-clock duration before the next one starts, and a 429 is retried
//! exactly once after a fixed backoff.

use std::time::Duration;

use govuk_content_client::{ContentApiError, ContentItem};
use tokio::time::{sleep, Instant};
use tracing::{error, info, warn};

use crate::kernel::BaseContentApi;

/// Document types dropped as soon as a response arrives.
pub const PER_REQUEST_SKIP_TYPES: [&str; 2] = ["placeholder", "redirect"];

#[derive(Debug, Clone)]
pub struct BatchPolicy {
    pub batch_size: usize,
    /// Minimum time from the start of one batch to the start of the next.
    pub min_batch_duration: Duration,
    /// Wait before the single retry of a rate-limited request.
    pub rate_limit_backoff: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: 10,
            min_batch_duration: Duration::from_secs(1),
            rate_limit_backoff: Duration::from_secs(5),
        }
    }
}

/// Result of querying one path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    Fetched(ContentItem),
    Skipped { document_type: String },
    Missing { reason: String },
}

/// Query one path, retrying once after a backoff if rate limited.
pub async fn fetch_path(
    api: &dyn BaseContentApi,
    path: &str,
    policy: &BatchPolicy,
) -> PathOutcome {
    let result = match api.fetch_content(path).await {
        Err(ContentApiError::RateLimited { .. }) => {
            warn!(
                path,
                backoff_secs = policy.rate_limit_backoff.as_secs_f32(),
                "Rate limit hit, waiting before retry"
            );
            sleep(policy.rate_limit_backoff).await;
            api.fetch_content(path).await
        }
        other => other,
    };

    match result {
        Ok(item) => match item.document_type() {
            Some(document_type) if PER_REQUEST_SKIP_TYPES.contains(&document_type) => {
                info!(path, document_type, "Skipping content");
                PathOutcome::Skipped {
                    document_type: document_type.to_string(),
                }
            }
            _ => PathOutcome::Fetched(item),
        },
        Err(e) => {
            error!(path, error = %e, "Error querying content API");
            PathOutcome::Missing {
                reason: e.to_string(),
            }
        }
    }
}

/// Query every path in order, batch by batch.
pub async fn query_in_batches(
    api: &dyn BaseContentApi,
    paths: &[String],
    policy: &BatchPolicy,
) -> Vec<(String, PathOutcome)> {
    let batch_size = policy.batch_size.max(1);
    let batch_count = paths.len().div_ceil(batch_size);
    let mut results = Vec::with_capacity(paths.len());

    for (index, batch) in paths.chunks(batch_size).enumerate() {
        let first = index * batch_size;
        info!(
            batch = index + 1,
            batches = batch_count,
            from = first,
            to = first + batch.len(),
            "Processing batch"
        );

        let started = Instant::now();
        for path in batch {
            let outcome = fetch_path(api, path, policy).await;
            results.push((path.clone(), outcome));
        }

        if index + 1 < batch_count {
            let elapsed = started.elapsed();
            if elapsed < policy.min_batch_duration {
                sleep(policy.min_batch_duration - elapsed).await;
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{MockContentApi, MockReply};
    use serde_json::json;

    fn page(document_type: &str) -> serde_json::Value {
        json!({"title": "T", "document_type": document_type})
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_retried_once_after_backoff() {
        let api = MockContentApi::new()
            .with_reply("/a", MockReply::RateLimited)
            .with_item("/a", page("answer"));
        let policy = BatchPolicy::default();

        let started = Instant::now();
        let outcome = fetch_path(&api, "/a", &policy).await;

        assert!(matches!(outcome, PathOutcome::Fetched(_)));
        assert_eq!(api.call_count("/a"), 2);
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_rate_limit_gives_up() {
        let api = MockContentApi::new().with_reply("/a", MockReply::RateLimited);

        let outcome = fetch_path(&api, "/a", &BatchPolicy::default()).await;

        assert!(matches!(outcome, PathOutcome::Missing { .. }));
        assert_eq!(api.call_count("/a"), 2);
    }

    #[tokio::test]
    async fn test_other_errors_not_retried() {
        let api = MockContentApi::new().with_reply("/a", MockReply::Status(500));

        let outcome = fetch_path(&api, "/a", &BatchPolicy::default()).await;

        assert!(matches!(outcome, PathOutcome::Missing { .. }));
        assert_eq!(api.call_count("/a"), 1);
    }

    #[tokio::test]
    async fn test_placeholder_and_redirect_skipped() {
        let api = MockContentApi::new()
            .with_item("/p", page("placeholder"))
            .with_item("/r", page("redirect"));
        let policy = BatchPolicy::default();

        assert_eq!(
            fetch_path(&api, "/p", &policy).await,
            PathOutcome::Skipped {
                document_type: "placeholder".into()
            }
        );
        assert_eq!(
            fetch_path(&api, "/r", &policy).await,
            PathOutcome::Skipped {
                document_type: "redirect".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_batches_padded_to_minimum_duration() {
        let paths: Vec<String> = (0..25).map(|i| format!("/page-{}", i)).collect();
        let mut api = MockContentApi::new();
        for path in &paths {
            api = api.with_item(path, page("answer"));
        }

        let started = Instant::now();
        let results = query_in_batches(&api, &paths, &BatchPolicy::default()).await;
        let elapsed = started.elapsed();

        assert_eq!(results.len(), 25);
        // 3 batches: padded after the first two only
        assert!(elapsed >= Duration::from_secs(2), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(3), "elapsed {:?}", elapsed);
        assert_eq!(api.calls(), paths);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_batch_not_padded() {
        let paths: Vec<String> = vec!["/a".into(), "/b".into()];
        let api = MockContentApi::new()
            .with_reply("/a", MockReply::RateLimited)
            .with_item("/a", page("answer"))
            .with_item("/b", page("answer"));
        let policy = BatchPolicy {
            batch_size: 1,
            ..BatchPolicy::default()
        };

        let started = Instant::now();
        query_in_batches(&api, &paths, &policy).await;

        // The 5s backoff already exceeds the 1s minimum
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(6));
    }
}
