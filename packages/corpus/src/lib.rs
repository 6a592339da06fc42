// GOV.UK writing-quality corpus builder - core library
//
// Two batch pipelines share this crate:
// - domains::fetcher scrapes the Content API into markdown records
// - domains::synthesizer attaches model-generated "badly written" variants
//
// Binaries in src/bin/ wire configuration, logging and the real clients together.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod models;

pub use config::*;
