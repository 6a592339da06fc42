use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentApiError>;

#[derive(Debug, Error)]
pub enum ContentApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the API. Callers decide whether to back off and retry.
    #[error("rate limited while fetching {path}")]
    RateLimited { path: String },

    #[error("content API returned {status} for {path}: {message}")]
    Api {
        path: String,
        status: u16,
        message: String,
    },

    #[error("invalid JSON for {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
