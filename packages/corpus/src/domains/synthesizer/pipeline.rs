//! Synthesize-and-augment pipeline.
//!
//! Best effort: a failed generation leaves that record without augmentation
//! and the run carries on. Only reading the input or writing the output can
//! fail the run.

use std::io::Write;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{error, info};

use super::generate::synthesize;
use crate::common::{load_records, save_records, Reporter, StorageError};
use crate::config::SynthesizerConfig;
use crate::kernel::BaseAI;
use crate::models::ContentRecord;

#[derive(Debug, Clone)]
pub struct SynthesisPolicy {
    pub batch_size: usize,
    /// Pause between batches; none after the last.
    pub batch_pause: Duration,
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_pause: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisStats {
    pub articles: usize,
    /// Records with a body, i.e. sent to the model.
    pub attempted: usize,
    pub augmented: usize,
    pub snippets: usize,
    /// Time spent inside batches, pauses excluded.
    pub processing_time: Duration,
    /// Wall-clock time of the whole run, set by [`run`].
    pub total_time: Duration,
}

impl SynthesisStats {
    pub fn failed(&self) -> usize {
        self.attempted - self.augmented
    }

    pub fn average_snippets(&self) -> f64 {
        if self.augmented == 0 {
            return 0.0;
        }
        self.snippets as f64 / self.augmented as f64
    }

    pub fn average_time_per_article(&self) -> Duration {
        match u32::try_from(self.articles) {
            Ok(n) if n > 0 => self.processing_time / n,
            _ => Duration::ZERO,
        }
    }

    pub fn report<W: Write>(&self, reporter: &mut Reporter<W>) {
        reporter.heading("Processing Complete");
        reporter.line(format_args!("Source articles: {}", self.articles));
        reporter.line(format_args!("Articles augmented: {}", self.augmented));
        if self.failed() > 0 {
            reporter.line(format_args!("Articles failed: {}", self.failed()));
        }
        reporter.line(format_args!("Total snippets created: {}", self.snippets));
        reporter.line(format_args!(
            "Average snippets per augmented article: {:.1}",
            self.average_snippets()
        ));
        reporter.line(format_args!(
            "Total processing time: {:.1}s",
            self.total_time.as_secs_f64()
        ));
        reporter.line(format_args!(
            "Average time per article: {:.1}s",
            self.average_time_per_article().as_secs_f64()
        ));
    }
}

/// Augment one record in place. Returns whether it was augmented.
pub async fn augment_record(ai: &dyn BaseAI, record: &mut ContentRecord) -> bool {
    let Some(body) = record.body() else {
        return false;
    };

    info!(title = %record.title, "Processing synthetic content");
    match synthesize(ai, body).await {
        Ok(augmentation) => {
            record.synthetic_data = Some(augmentation);
            true
        }
        Err(e) => {
            error!(
                title = %record.title,
                base_path = %record.base_path,
                error = %format!("{:#}", e),
                "Error generating synthetic content"
            );
            record.synthetic_data = None;
            false
        }
    }
}

/// Augment every record with a body, batch by batch, reporting progress.
pub async fn augment_records<W: Write>(
    ai: &dyn BaseAI,
    records: &mut [ContentRecord],
    policy: &SynthesisPolicy,
    reporter: &mut Reporter<W>,
) -> SynthesisStats {
    let batch_size = policy.batch_size.max(1);
    let batch_count = records.len().div_ceil(batch_size);
    let mut stats = SynthesisStats {
        articles: records.len(),
        ..Default::default()
    };
    let mut processed = 0;

    for (index, batch) in records.chunks_mut(batch_size).enumerate() {
        let started = Instant::now();
        let mut batch_snippets = 0;

        for record in batch.iter_mut() {
            if !record.has_body() {
                continue;
            }
            stats.attempted += 1;
            if augment_record(ai, record).await {
                stats.augmented += 1;
                batch_snippets += record.snippet_count();
            }
        }

        let batch_time = started.elapsed();
        stats.processing_time += batch_time;
        stats.snippets += batch_snippets;
        processed += batch.len();

        reporter.line(format_args!("\nBatch {} complete:", index + 1));
        reporter.line(format_args!("Articles processed: {}", processed));
        reporter.line(format_args!("Snippets in this batch: {}", batch_snippets));
        reporter.line(format_args!("Total snippets created: {}", stats.snippets));
        reporter.line(format_args!(
            "Batch processing time: {:.1}s ({:.1}s per article)",
            batch_time.as_secs_f64(),
            batch_time.as_secs_f64() / batch.len() as f64
        ));

        if index + 1 < batch_count {
            reporter.line("Waiting for rate limit...");
            sleep(policy.batch_pause).await;
        }
    }

    stats
}

/// Full synthesizer run: load, augment, save, report.
pub async fn run<W: Write>(
    config: &SynthesizerConfig,
    ai: &dyn BaseAI,
    reporter: &mut Reporter<W>,
) -> Result<SynthesisStats, StorageError> {
    let started = Instant::now();

    let mut records = load_records(&config.input_path)?;
    reporter.heading("Starting Processing");
    reporter.line(format_args!("Source articles loaded: {}", records.len()));

    let mut stats = augment_records(ai, &mut records, &config.policy, reporter).await;

    save_records(&config.output_path, &records)?;
    stats.total_time = started.elapsed();

    stats.report(reporter);
    reporter.line(format_args!("Output saved to: {}", config.output_path.display()));

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockAI;
    use serde_json::json;

    fn record(title: &str, body: Option<&str>) -> ContentRecord {
        serde_json::from_value(json!({
            "title": title,
            "base_path": format!("/{}", title.to_lowercase()),
            "content_id": title,
            "document_type": "answer",
            "schema_name": "answer",
            "details": {"body": body},
            "links": {}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_records_without_body_not_sent() {
        let ai = MockAI::new();
        let mut records = vec![
            record("A", Some("Alpha")),
            record("B", None),
            record("C", Some(" ")),
        ];

        let mut reporter = Reporter::buffer();
        let stats =
            augment_records(&ai, &mut records, &SynthesisPolicy::default(), &mut reporter).await;

        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.augmented, 1);
        assert_eq!(ai.prompted_contents(), vec!["Alpha"]);
        assert!(records[1].synthetic_data.is_none());
        assert!(records[2].synthetic_data.is_none());
    }

    #[tokio::test]
    async fn test_failure_clears_augmentation() {
        let ai = MockAI::new().failing_on("Alpha");
        let mut target = record("A", Some("Alpha"));
        target.synthetic_data = Some(crate::models::SyntheticAugmentation {
            poorly_written_article: "stale".into(),
            article_snippets: None,
        });

        assert!(!augment_record(&ai, &mut target).await);
        assert!(target.synthetic_data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_between_batches_only() {
        let ai = MockAI::new();
        let mut records: Vec<_> = (0..21)
            .map(|i| record(&format!("R{}", i), Some("Body")))
            .collect();
        let mut reporter = Reporter::buffer();

        let started = Instant::now();
        let stats =
            augment_records(&ai, &mut records, &SynthesisPolicy::default(), &mut reporter).await;
        let elapsed = started.elapsed();

        assert_eq!(stats.augmented, 21);
        assert_eq!(stats.snippets, 42);
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
        assert_eq!(reporter.output().matches("Waiting for rate limit...").count(), 2);
        assert!(reporter.output().contains("Batch 3 complete:\nArticles processed: 21"));
    }

    #[test]
    fn test_stats_averages() {
        let stats = SynthesisStats {
            articles: 4,
            attempted: 3,
            augmented: 2,
            snippets: 5,
            processing_time: Duration::from_secs(8),
            total_time: Duration::from_secs(10),
        };

        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.average_snippets(), 2.5);
        assert_eq!(stats.average_time_per_article(), Duration::from_secs(2));

        let mut reporter = Reporter::buffer();
        stats.report(&mut reporter);
        assert!(reporter.output().contains("Average snippets per augmented article: 2.5"));
        assert!(reporter.output().contains("Articles failed: 1"));
    }

    #[test]
    fn test_empty_stats_do_not_divide_by_zero() {
        let stats = SynthesisStats::default();
        assert_eq!(stats.average_snippets(), 0.0);
        assert_eq!(stats.average_time_per_article(), Duration::ZERO);
    }
}
