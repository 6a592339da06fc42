// Scrape GOV.UK content paths into markdown-bodied records
//
// Reads the `Path` column of the input CSV, queries the Content API in
// rate-limited batches and writes the records as a JSON array.

use anyhow::{Context, Result};
use corpus_core::common::Reporter;
use corpus_core::domains::fetcher::{self, FetchError};
use corpus_core::kernel::ContentApiClient;
use corpus_core::FetcherConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,corpus_core=debug,reqwest=warn,hyper=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = FetcherConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        base_url = %config.content_api_base_url,
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        "Starting fetcher"
    );

    let api = ContentApiClient::new().with_base_url(&config.content_api_base_url);
    let mut reporter = Reporter::stdout();

    match fetcher::run(&config, &api, &mut reporter).await {
        Ok(_) => Ok(()),
        Err(e) => {
            if let Some(payload) = e.raw_payload() {
                abort_with_payload(&e, payload);
            }
            Err(e).context("Fetcher run failed")
        }
    }
}

/// Dump the offending response and stop before anything else is written.
fn abort_with_payload(error: &FetchError, payload: &serde_json::Value) -> ! {
    tracing::error!(
        path = error.content_path().unwrap_or_default(),
        error = %error,
        "Aborting run on unprocessable record"
    );
    let dump = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    eprintln!("Raw response:\n{}", dump);
    std::process::exit(1);
}
