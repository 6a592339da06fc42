use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::domains::fetcher::BatchPolicy;
use crate::domains::synthesizer::SynthesisPolicy;
use crate::kernel::GPT_4O_MINI;

pub const DEFAULT_PATHS_CSV: &str = "./data/filtered_gov_uk_paths.csv";
pub const DEFAULT_RECORDS_JSON: &str = "./data/gov_pages_with_body_content.json";
pub const DEFAULT_SYNTHETIC_JSON: &str = "./data/gov_pages_with_synthetic_content.json";

/// Fetcher configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub content_api_base_url: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub policy: BatchPolicy,
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            content_api_base_url: env::var("CONTENT_API_BASE_URL")
                .unwrap_or_else(|_| govuk_content_client::DEFAULT_BASE_URL.to_string()),
            input_path: path_var("FETCHER_INPUT_PATH", DEFAULT_PATHS_CSV),
            output_path: path_var("FETCHER_OUTPUT_PATH", DEFAULT_RECORDS_JSON),
            policy: BatchPolicy::default(),
        })
    }
}

/// Synthesizer configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub policy: SynthesisPolicy,
}

impl SynthesizerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| GPT_4O_MINI.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            input_path: path_var("FETCHER_OUTPUT_PATH", DEFAULT_RECORDS_JSON),
            output_path: path_var("SYNTHESIZER_OUTPUT_PATH", DEFAULT_SYNTHETIC_JSON),
            policy: SynthesisPolicy::default(),
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
