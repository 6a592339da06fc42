// Content API implementation using the GOV.UK client

use async_trait::async_trait;
use govuk_content_client::{ContentApiClient, ContentItem};

use super::BaseContentApi;

#[async_trait]
impl BaseContentApi for ContentApiClient {
    async fn fetch_content(&self, path: &str) -> govuk_content_client::Result<ContentItem> {
        self.fetch(path).await
    }
}
