//! Pure GOV.UK Content API client.
//!
//! Fetches one content item per request from `https://www.gov.uk/api/content`.
//! Responses are returned as raw JSON; no retries or throttling happen here.
//!
//! # Example
//!
//! ```rust,ignore
//! use govuk_content_client::ContentApiClient;
//!
//! let client = ContentApiClient::new();
//! let item = client.fetch("/browse/benefits").await?;
//! println!("{:?}", item.document_type());
//! ```

pub mod error;
pub mod types;

pub use error::{ContentApiError, Result};
pub use types::ContentItem;

use reqwest::StatusCode;

pub const DEFAULT_BASE_URL: &str = "https://www.gov.uk/api/content";

#[derive(Clone)]
pub struct ContentApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ContentApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentApiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full API URL for a content path (`/foo` or `foo`).
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Fetch a single content item.
    pub async fn fetch(&self, path: &str) -> Result<ContentItem> {
        let url = self.url_for(path);
        tracing::debug!(path, url = %url, "Querying content API");

        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ContentApiError::RateLimited {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ContentApiError::Api {
                path: path.to_string(),
                status: status.as_u16(),
                message: body,
            });
        }

        let text = resp.text().await?;
        let payload = serde_json::from_str(&text).map_err(|source| ContentApiError::Parse {
            path: path.to_string(),
            source,
        })?;

        Ok(ContentItem::new(path, payload))
    }
}
