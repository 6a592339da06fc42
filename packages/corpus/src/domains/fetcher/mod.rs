// Fetcher domain - content paths to normalized, markdown-bodied records

pub mod batch;
pub mod error;
pub mod markdown;
pub mod normalize;
pub mod paths;
pub mod pipeline;

pub use batch::{fetch_path, query_in_batches, BatchPolicy, PathOutcome};
pub use error::FetchError;
pub use normalize::{normalize_payload, SchemaReport};
pub use paths::{dedupe_paths, load_paths};
pub use pipeline::{fetch_records, process_item, run, FetchSummary, RecordOutcome};
