pub mod fetcher;
pub mod synthesizer;
