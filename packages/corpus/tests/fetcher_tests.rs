//! End-to-end fetcher behaviour against a scripted Content API.

mod common;

use std::time::Duration;

use common::*;
use corpus_core::common::{load_records, Reporter};
use corpus_core::domains::fetcher::{self, fetch_records, BatchPolicy, FetchError};
use corpus_core::kernel::{MockContentApi, MockReply};
use tokio::time::Instant;

fn paths(values: &[&str]) -> Vec<String> {
    values.iter().map(|p| p.to_string()).collect()
}

#[tokio::test]
async fn repeated_paths_queried_once_in_first_seen_order() {
    let api = MockContentApi::new()
        .with_item("/b", page_payload("/b", "answer", "<p>B</p>"))
        .with_item("/a", page_payload("/a", "answer", "<p>A</p>"));

    let requested = paths(&["/b", "/a", "/b", "/a", "/b"]);
    let summary = fetch_records(&api, requested, &BatchPolicy::default())
        .await
        .unwrap();

    assert_eq!(api.calls(), vec!["/b", "/a"]);
    assert_eq!(summary.unique_paths, 2);
    let order: Vec<_> = summary.records.iter().map(|r| r.base_path.as_str()).collect();
    assert_eq!(order, vec!["/b", "/a"]);
}

#[tokio::test]
async fn excluded_document_types_counted_once_each() {
    let api = MockContentApi::new()
        .with_item("/p", page_payload("/p", "placeholder", "<p>x</p>"))
        .with_item("/r", page_payload("/r", "redirect", "<p>x</p>"))
        .with_item("/g1", page_payload("/g1", "government", "<p>x</p>"))
        .with_item("/g2", page_payload("/g2", "government", "<p>x</p>"))
        .with_item("/m", page_payload("/m", "mainstream_browse_page", "<p>x</p>"))
        .with_item("/ok", page_payload("/ok", "answer", "<p>Kept</p>"));

    let summary = fetch_records(
        &api,
        paths(&["/p", "/r", "/g1", "/g2", "/m", "/ok"]),
        &BatchPolicy::default(),
    )
    .await
    .unwrap();

    assert_eq!(summary.records.len(), 1);
    assert_eq!(summary.records[0].base_path, "/ok");
    let skipped: Vec<_> = summary.skipped.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(
        skipped,
        vec![
            ("placeholder", 1),
            ("redirect", 1),
            ("government", 2),
            ("mainstream_browse_page", 1)
        ]
    );
}

#[tokio::test]
async fn guide_parts_merged_into_markdown_body() {
    let api = MockContentApi::new().with_item(
        "/guide",
        guide_payload(
            "/guide",
            &[
                (Some("Overview"), "<p>Who can apply.</p>"),
                (None, "<p>Anyone else.</p>"),
                (Some("Skipped"), ""),
            ],
        ),
    );

    let summary = fetch_records(&api, paths(&["/guide"]), &BatchPolicy::default())
        .await
        .unwrap();

    let record = &summary.records[0];
    let body = record.details.body.as_deref().unwrap();
    assert_eq!(
        body,
        "## Overview\n\nWho can apply.\n\n## Untitled Section\n\nAnyone else."
    );
    assert!(!body.contains("\\#"));
    assert!(record.details.parts.is_none());
}

#[tokio::test]
async fn missing_body_aborts_the_run() {
    let api = MockContentApi::new()
        .with_item("/a", page_payload("/a", "answer", "<p>A</p>"))
        .with_item("/empty", bodiless_payload("/empty", "answer"))
        .with_item("/c", page_payload("/c", "answer", "<p>C</p>"));

    let err = fetch_records(&api, paths(&["/a", "/empty", "/c"]), &BatchPolicy::default())
        .await
        .unwrap_err();

    match &err {
        FetchError::MissingBody { path, .. } => assert_eq!(path, "/empty"),
        other => panic!("expected MissingBody, got {:?}", other),
    }
    assert_eq!(err.raw_payload().unwrap()["base_path"], "/empty");
}

#[tokio::test]
async fn failed_requests_do_not_stop_the_run() {
    let api = MockContentApi::new()
        .with_reply("/broken", MockReply::Status(500))
        .with_item("/ok", page_payload("/ok", "answer", "<p>Fine</p>"));

    let summary = fetch_records(&api, paths(&["/broken", "/gone", "/ok"]), &BatchPolicy::default())
        .await
        .unwrap();

    assert_eq!(summary.missing, 2);
    assert_eq!(summary.records.len(), 1);
    assert!(summary.skipped.is_empty());
}

#[tokio::test(start_paused = true)]
async fn rate_limited_path_retried_and_kept() {
    let api = MockContentApi::new()
        .with_reply("/busy", MockReply::RateLimited)
        .with_item("/busy", page_payload("/busy", "answer", "<p>Eventually</p>"));

    let summary = fetch_records(&api, paths(&["/busy"]), &BatchPolicy::default())
        .await
        .unwrap();

    assert_eq!(api.call_count("/busy"), 2);
    assert_eq!(summary.records[0].details.body.as_deref(), Some("Eventually"));
}

#[tokio::test(start_paused = true)]
async fn batches_throttled_to_one_per_second() {
    let all: Vec<String> = (0..40).map(|i| format!("/p{}", i)).collect();
    let mut api = MockContentApi::new();
    for path in &all {
        api = api.with_item(path, page_payload(path, "answer", "<p>x</p>"));
    }

    let started = Instant::now();
    let summary = fetch_records(&api, all.clone(), &BatchPolicy::default())
        .await
        .unwrap();

    assert_eq!(summary.records.len(), 40);
    // 4 batches, so at least 3 seconds of throttling
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test]
async fn run_writes_records_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let config = fetcher_config(dir.path());
    write_paths_csv(&config.input_path, &["/vat-rates", "/redirected", "/vat-rates"]);

    let api = MockContentApi::new()
        .with_item(
            "/vat-rates",
            page_payload(
                "/vat-rates",
                "answer",
                r#"<p>See <a href="/vat">VAT</a> <strong>now</strong>.</p>"#,
            ),
        )
        .with_item("/redirected", page_payload("/redirected", "redirect", ""));
    let mut reporter = Reporter::buffer();

    let summary = fetcher::run(&config, &api, &mut reporter).await.unwrap();

    assert_eq!(summary.records.len(), 1);
    let saved = load_records(&config.output_path).unwrap();
    assert_eq!(saved, summary.records);
    assert_eq!(
        saved[0].details.body.as_deref(),
        Some("See [VAT](/vat) **now**.")
    );
    assert_eq!(saved[0].links.organisations[0].title, "HM Revenue & Customs");

    let output = reporter.output();
    assert!(output.contains("Total unique paths: 2"));
    assert!(output.contains("Successfully processed: 1"));
    assert!(output.contains("Processed documents by type:\n- answer: 1"));
    assert!(output.contains("Skipped documents by type:\n- redirect: 1"));
    assert!(output.contains("Saved 1 records to"));
}

#[tokio::test]
async fn run_without_body_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = fetcher_config(dir.path());
    write_paths_csv(&config.input_path, &["/empty"]);
    let api = MockContentApi::new().with_item("/empty", bodiless_payload("/empty", "answer"));

    let result = fetcher::run(&config, &api, &mut Reporter::buffer()).await;

    assert!(matches!(result, Err(FetchError::MissingBody { .. })));
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn run_without_path_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = fetcher_config(dir.path());
    std::fs::write(&config.input_path, "Url\n/a\n").unwrap();

    let result = fetcher::run(&config, &MockContentApi::new(), &mut Reporter::buffer()).await;

    assert!(matches!(result, Err(FetchError::MissingColumn { .. })));
}
