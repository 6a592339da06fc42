// Utilities shared by both pipelines

pub mod reporting;
pub mod storage;

pub use reporting::Reporter;
pub use storage::{load_records, save_records, StorageError};
