//! Turning a raw Content API payload into a [`ContentRecord`].
//!
//! Steps, in order: report missing important fields, merge guide parts into
//! a single body, coerce multi-format bodies to HTML, report fields the
//! schema drops, build the record, require a body, convert it to markdown.

use std::convert::Infallible;
use std::io;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::markdown::html_to_markdown;
use super::FetchError;
use crate::models::{ContentRecord, GuidePart, CONTENT_RECORD_FIELDS};

pub const GUIDE_DOCUMENT_TYPE: &str = "guide";
pub const UNTITLED_SECTION: &str = "Untitled Section";

/// Fields whose absence is reported with the raw payload.
pub const IMPORTANT_FIELDS: [&str; 4] = ["title", "base_path", "content_id", "document_type"];

/// Discrepancies between a payload and the record schema. Never fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaReport {
    /// Important fields that were absent, null or empty.
    pub missing: Vec<&'static str>,
    /// Top-level payload fields the record does not keep.
    pub dropped: Vec<String>,
    /// Fields rewritten into the shape the record expects.
    pub coerced: Vec<&'static str>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.dropped.is_empty() && self.coerced.is_empty()
    }
}

/// Build a markdown-bodied record from a raw payload.
pub fn normalize_payload(
    path: &str,
    mut payload: Value,
) -> Result<(ContentRecord, SchemaReport), FetchError> {
    let mut report = SchemaReport {
        missing: missing_important_fields(&payload),
        ..Default::default()
    };
    if !report.missing.is_empty() {
        warn!(
            path,
            missing = ?report.missing,
            raw_response = %payload,
            "Missing fields in response"
        );
    }

    let guide_parts = match merge_guide_body(&mut payload) {
        Ok(parts) => parts,
        Err(source) => {
            return Err(FetchError::InvalidRecord {
                path: path.to_string(),
                source,
                payload: Box::new(payload),
            })
        }
    };
    if coerce_multiformat_body(&mut payload) {
        report.coerced.push("details.body");
    }

    report.dropped = dropped_fields(&payload);
    if !report.dropped.is_empty() {
        warn!(path, dropped = ?report.dropped, "Fields dropped during record conversion");
    }

    let mut record: ContentRecord = match ContentRecord::deserialize(&payload) {
        Ok(record) => record,
        Err(source) => {
            return Err(FetchError::InvalidRecord {
                path: path.to_string(),
                source,
                payload: Box::new(payload),
            })
        }
    };

    let Some(html) = record.body() else {
        return Err(FetchError::MissingBody {
            path: path.to_string(),
            document_type: record.document_type,
            payload: Box::new(payload),
        });
    };

    // Part bodies are converted one by one so the section headings stay markdown
    let converted = match &guide_parts {
        Some(parts) => guide_parts_to_markdown(parts),
        None => html_to_markdown(html),
    };
    match converted {
        Ok(markdown) => record.details.body = Some(markdown),
        Err(source) => {
            return Err(FetchError::Markdown {
                path: path.to_string(),
                source,
                payload: Box::new(payload),
            })
        }
    }

    Ok((record, report))
}

/// Important fields that are absent, null, or empty strings.
pub fn missing_important_fields(payload: &Value) -> Vec<&'static str> {
    IMPORTANT_FIELDS
        .into_iter()
        .filter(|field| match payload.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .collect()
}

/// Top-level payload keys not kept by [`ContentRecord`], sorted.
pub fn dropped_fields(payload: &Value) -> Vec<String> {
    let mut dropped: Vec<String> = payload
        .as_object()
        .map(|fields| {
            fields
                .keys()
                .filter(|key| !CONTENT_RECORD_FIELDS.contains(&key.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    dropped.sort();
    dropped
}

/// Concatenate guide parts under level-2 headings.
///
/// Parts without a body are left out; a missing or empty title becomes
/// "Untitled Section".
pub fn merge_guide_parts(parts: &[GuidePart]) -> String {
    match merge_parts_with(parts, |body| Ok::<_, Infallible>(body.to_string())) {
        Ok(merged) => merged,
        Err(never) => match never {},
    }
}

/// Same layout as [`merge_guide_parts`], with each part body converted to
/// markdown first.
pub fn guide_parts_to_markdown(parts: &[GuidePart]) -> io::Result<String> {
    let merged = merge_parts_with(parts, html_to_markdown)?;
    Ok(merged.trim().to_string())
}

fn merge_parts_with<E>(
    parts: &[GuidePart],
    mut render: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let mut combined = String::new();
    for part in parts {
        let Some(body) = part.body.as_deref().filter(|b| !b.is_empty()) else {
            continue;
        };
        let title = part
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_SECTION);
        combined.push_str("\n\n## ");
        combined.push_str(title);
        combined.push_str("\n\n");
        combined.push_str(&render(body)?);
    }
    Ok(combined)
}

/// For guides with a non-empty `details.parts`, replace `details.body` with
/// the merged parts and clear `parts`. Returns the merged parts.
pub fn merge_guide_body(
    payload: &mut Value,
) -> Result<Option<Vec<GuidePart>>, serde_json::Error> {
    if payload.get("document_type").and_then(Value::as_str) != Some(GUIDE_DOCUMENT_TYPE) {
        return Ok(None);
    }
    let Some(details) = payload.get_mut("details").and_then(Value::as_object_mut) else {
        return Ok(None);
    };
    let Some(raw_parts) = details.get("parts").and_then(Value::as_array) else {
        return Ok(None);
    };
    if raw_parts.is_empty() {
        return Ok(None);
    }

    let mut parts = Vec::with_capacity(raw_parts.len());
    for raw in raw_parts {
        let mut raw = raw.clone();
        if let Some(part) = raw.as_object_mut() {
            select_html_body(part);
        }
        parts.push(GuidePart::deserialize(&raw)?);
    }

    details.insert("body".to_string(), Value::String(merge_guide_parts(&parts)));
    details.insert("parts".to_string(), Value::Null);
    Ok(Some(parts))
}

/// Multi-format body entry (`[{content_type, content}, ...]`).
#[derive(Debug, Deserialize)]
struct BodyFormat {
    content_type: String,
    content: String,
}

/// Replace a multi-format `details.body` with its `text/html` content.
/// Returns whether the body was rewritten.
pub fn coerce_multiformat_body(payload: &mut Value) -> bool {
    payload
        .get_mut("details")
        .and_then(Value::as_object_mut)
        .map(select_html_body)
        .unwrap_or(false)
}

fn select_html_body(fields: &mut Map<String, Value>) -> bool {
    let Some(Value::Array(entries)) = fields.get("body") else {
        return false;
    };
    let html = entries
        .iter()
        .filter_map(|entry| BodyFormat::deserialize(entry).ok())
        .find(|format| format.content_type == "text/html")
        .map(|format| Value::String(format.content))
        .unwrap_or(Value::Null);

    fields.insert("body".to_string(), html);
    true
}
