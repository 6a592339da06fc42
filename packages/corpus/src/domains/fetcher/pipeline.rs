//! Fetch-and-normalize pipeline: paths in, markdown-bodied records out.

use std::io::Write;

use indexmap::IndexMap;
use tracing::{info, warn};

use super::batch::{query_in_batches, BatchPolicy, PathOutcome};
use super::normalize::normalize_payload;
use super::paths::{dedupe_paths, load_paths};
use super::FetchError;
use crate::common::{save_records, Reporter};
use crate::config::FetcherConfig;
use crate::kernel::{BaseContentApi, ContentItem};
use crate::models::{count_by_document_type, ContentRecord};

/// Document types dropped before record construction.
pub const EXCLUDED_DOCUMENT_TYPES: [&str; 2] = ["government", "mainstream_browse_page"];

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Record(Box<ContentRecord>),
    Skipped { document_type: String },
}

/// Turn one fetched item into a record, or skip it by document type.
pub fn process_item(item: ContentItem) -> Result<RecordOutcome, FetchError> {
    if let Some(document_type) = item
        .document_type()
        .filter(|t| EXCLUDED_DOCUMENT_TYPES.contains(t))
    {
        info!(path = %item.path, document_type, "Skipping content");
        return Ok(RecordOutcome::Skipped {
            document_type: document_type.to_string(),
        });
    }

    let ContentItem { path, payload } = item;
    let (record, report) = normalize_payload(&path, payload)?;
    if !report.coerced.is_empty() {
        info!(path = %path, coerced = ?report.coerced, "Coerced fields to record schema");
    }
    Ok(RecordOutcome::Record(Box::new(record)))
}

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub unique_paths: usize,
    pub records: Vec<ContentRecord>,
    /// Skipped responses per document type, in first-seen order.
    pub skipped: IndexMap<String, usize>,
    /// Paths whose request failed.
    pub missing: usize,
}

impl FetchSummary {
    fn skip(&mut self, document_type: String) {
        *self.skipped.entry(document_type).or_insert(0) += 1;
    }

    pub fn report<W: Write>(&self, reporter: &mut Reporter<W>) {
        reporter.heading("Processing Summary");
        reporter.line(format_args!("Total unique paths: {}", self.unique_paths));
        reporter.line(format_args!("Successfully processed: {}", self.records.len()));
        if self.missing > 0 {
            reporter.line(format_args!("Failed requests: {}", self.missing));
        }
        reporter.counts(
            "Processed documents by type",
            &count_by_document_type(&self.records),
        );
        reporter.counts("Skipped documents by type", &self.skipped);
    }
}

/// Dedupe, query and normalize. The first fatal record error aborts the run.
pub async fn fetch_records(
    api: &dyn BaseContentApi,
    paths: Vec<String>,
    policy: &BatchPolicy,
) -> Result<FetchSummary, FetchError> {
    let paths = dedupe_paths(paths);
    info!(unique_paths = paths.len(), "Querying content API");

    let mut summary = FetchSummary {
        unique_paths: paths.len(),
        ..Default::default()
    };

    for (path, outcome) in query_in_batches(api, &paths, policy).await {
        match outcome {
            PathOutcome::Fetched(item) => match process_item(item)? {
                RecordOutcome::Record(record) => summary.records.push(*record),
                RecordOutcome::Skipped { document_type } => summary.skip(document_type),
            },
            PathOutcome::Skipped { document_type } => summary.skip(document_type),
            PathOutcome::Missing { reason } => {
                warn!(path = %path, reason = %reason, "No content for path");
                summary.missing += 1;
            }
        }
    }

    Ok(summary)
}

/// Full fetcher run: read paths, fetch, save, report.
pub async fn run<W: Write>(
    config: &FetcherConfig,
    api: &dyn BaseContentApi,
    reporter: &mut Reporter<W>,
) -> Result<FetchSummary, FetchError> {
    let paths = load_paths(&config.input_path)?;
    let summary = fetch_records(api, paths, &config.policy).await?;

    summary.report(reporter);

    save_records(&config.output_path, &summary.records)?;
    reporter.line(format_args!(
        "\nSaved {} records to {}",
        summary.records.len(),
        config.output_path.display()
    ));

    Ok(summary)
}
