// Attach model-generated "badly written" variants to fetched records

use anyhow::{Context, Result};
use corpus_core::common::Reporter;
use corpus_core::domains::synthesizer;
use corpus_core::kernel::{OpenAIClient, OpenAIStructuredAI};
use corpus_core::SynthesizerConfig;
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

    let config = SynthesizerConfig::from_env().context("Failed to load configuration")?;

    let mut client = OpenAIClient::new(config.openai_api_key.clone());
    if let Some(base_url) = &config.openai_base_url {
        client = client.with_base_url(base_url);
    }
    let ai = OpenAIStructuredAI::new(client, &config.openai_model);
    tracing::info!(
        model = %ai.model(),
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        "Starting synthesizer"
    );

    let mut reporter = Reporter::stdout();
    synthesizer::run(&config, &ai, &mut reporter)
        .await
        .context("Synthesizer run failed")?;

    Ok(())
}
