use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::common::StorageError;

/// Errors that abort a fetcher run.
///
/// Per-path request failures are not errors here: they become
/// `PathOutcome::Missing` and the run continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read paths from {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// Upstream data defect: a page that should have content has none.
    #[error("page without body content: {path} ({document_type})")]
    MissingBody {
        path: String,
        document_type: String,
        payload: Box<Value>,
    },

    #[error("failed to build record for {path}: {source}")]
    InvalidRecord {
        path: String,
        #[source]
        source: serde_json::Error,
        payload: Box<Value>,
    },

    #[error("failed to convert body of {path} to markdown: {source}")]
    Markdown {
        path: String,
        #[source]
        source: std::io::Error,
        payload: Box<Value>,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl FetchError {
    /// Raw API response that triggered the error, for manual diagnosis.
    pub fn raw_payload(&self) -> Option<&Value> {
        match self {
            FetchError::MissingBody { payload, .. }
            | FetchError::InvalidRecord { payload, .. }
            | FetchError::Markdown { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Content path the error is about, when it concerns a single page.
    pub fn content_path(&self) -> Option<&str> {
        match self {
            FetchError::MissingBody { path, .. }
            | FetchError::InvalidRecord { path, .. }
            | FetchError::Markdown { path, .. } => Some(path),
            _ => None,
        }
    }
}
