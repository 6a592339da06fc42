use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::synthetic::SyntheticAugmentation;

pub const DEFAULT_LOCALE: &str = "en";

/// Top-level keys a [`ContentRecord`] keeps. Anything else in an API payload is dropped.
pub const CONTENT_RECORD_FIELDS: [&str; 15] = [
    "title",
    "base_path",
    "content_id",
    "description",
    "document_type",
    "schema_name",
    "locale",
    "api_path",
    "web_url",
    "details",
    "links",
    "public_updated_at",
    "first_published_at",
    "withdrawn",
    "synthetic_data",
];

/// One scraped GOV.UK page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub title: String,
    pub base_path: String,
    pub content_id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub document_type: String,
    pub schema_name: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub api_path: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub details: Details,
    pub links: Links,
    #[serde(default)]
    pub public_updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub first_published_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub withdrawn: bool,
    #[serde(default)]
    pub synthetic_data: Option<SyntheticAugmentation>,
}

impl ContentRecord {
    /// Body text when present and not blank.
    pub fn body(&self) -> Option<&str> {
        self.details
            .body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
    }

    pub fn has_body(&self) -> bool {
        self.body().is_some()
    }

    pub fn snippet_count(&self) -> usize {
        self.synthetic_data
            .as_ref()
            .map(SyntheticAugmentation::snippet_count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    /// HTML as fetched, markdown once the fetcher has converted it.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_related_links: Vec<serde_json::Value>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub ended_on: Option<String>,
    /// Multi-part guide sections; merged into `body` and cleared for guides.
    #[serde(default)]
    pub parts: Option<Vec<GuidePart>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidePart {
    /// Non-string titles are kept as their JSON text.
    #[serde(default, deserialize_with = "title_text")]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub title: String,
    pub base_path: String,
    pub api_path: String,
    pub web_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, deserialize_with = "null_as_default")]
    pub organisations: Vec<LinkEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent: Vec<LinkEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available_translations: Vec<LinkEntry>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn title_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(title) => Some(title),
        other => Some(other.to_string()),
    })
}

/// Count records per document type, in first-seen order.
pub fn count_by_document_type<'a, I>(records: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a ContentRecord>,
{
    let mut counts = IndexMap::new();
    for record in records {
        *counts.entry(record.document_type.clone()).or_insert(0) += 1;
    }
    counts
}
