// Shared data model for both pipelines

pub mod content_record;
pub mod synthetic;

pub use content_record::*;
pub use synthetic::*;
