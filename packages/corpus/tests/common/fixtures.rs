//! Test fixtures: Content API payloads, records and file-backed configs.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use corpus_core::domains::fetcher::BatchPolicy;
use corpus_core::domains::synthesizer::SynthesisPolicy;
use corpus_core::models::ContentRecord;
use corpus_core::{FetcherConfig, SynthesizerConfig};
use serde_json::{json, Value};

/// A Content API response with an HTML body.
pub fn page_payload(path: &str, document_type: &str, body: &str) -> Value {
    json!({
        "title": format!("Page {}", path),
        "base_path": path,
        "content_id": format!("id{}", path.replace('/', "-")),
        "description": "A page",
        "document_type": document_type,
        "schema_name": document_type,
        "locale": "en",
        "api_path": format!("/api/content{}", path),
        "web_url": format!("https://www.gov.uk{}", path),
        "public_updated_at": "2024-01-10T09:00:00.000+00:00",
        "first_published_at": "2015-06-01T12:00:00.000+01:00",
        "phase": "live",
        "details": {"body": body},
        "links": {
            "organisations": [{
                "title": "HM Revenue & Customs",
                "base_path": "/government/organisations/hm-revenue-customs",
                "api_path": "/api/content/government/organisations/hm-revenue-customs",
                "web_url": "https://www.gov.uk/government/organisations/hm-revenue-customs",
                "locale": "en"
            }]
        }
    })
}

/// A response with no body at all.
pub fn bodiless_payload(path: &str, document_type: &str) -> Value {
    let mut payload = page_payload(path, document_type, "");
    payload["details"] = json!({});
    payload
}

/// A multi-part guide: `(title, body)` per part.
pub fn guide_payload(path: &str, parts: &[(Option<&str>, &str)]) -> Value {
    let parts: Vec<Value> = parts
        .iter()
        .map(|(title, body)| json!({"title": title, "slug": "part", "body": body}))
        .collect();
    let mut payload = page_payload(path, "guide", "<p>Top level body</p>");
    payload["details"]["parts"] = Value::Array(parts);
    payload
}

/// An already-fetched record, as the synthesizer reads it.
pub fn record(title: &str, body: Option<&str>) -> ContentRecord {
    serde_json::from_value(json!({
        "title": title,
        "base_path": format!("/{}", title.to_lowercase().replace(' ', "-")),
        "content_id": title,
        "document_type": "answer",
        "schema_name": "answer",
        "details": {"body": body},
        "links": {}
    }))
    .unwrap()
}

/// Write a single-column `Path` CSV.
pub fn write_paths_csv(file: &Path, paths: &[&str]) {
    let mut csv = String::from("Page Title,Path\n");
    for path in paths {
        csv.push_str(&format!("Title,{}\n", path));
    }
    fs::write(file, csv).unwrap();
}

pub fn fetcher_config(dir: &Path) -> FetcherConfig {
    FetcherConfig {
        content_api_base_url: "http://content.test/api/content".to_string(),
        input_path: dir.join("paths.csv"),
        output_path: dir.join("out").join("records.json"),
        policy: BatchPolicy::default(),
    }
}

pub fn synthesizer_config(dir: &Path) -> SynthesizerConfig {
    SynthesizerConfig {
        openai_api_key: "sk-test".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        openai_base_url: None,
        input_path: dir.join("records.json"),
        output_path: dir.join("synthetic.json"),
        policy: SynthesisPolicy::default(),
    }
}
