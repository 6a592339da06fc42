//! Strict JSON schemas for OpenAI structured outputs, derived with `schemars`.
//!
//! OpenAI's strict mode accepts only a subset of JSON Schema:
//! 1. every object schema carries `additionalProperties: false`
//! 2. every property is listed in `required`, nullable ones included
//! 3. no `$ref`: nested definitions are inlined
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct ArticleSnippets {
//!     snippets: Vec<Snippet>,
//! }
//!
//! let schema = ArticleSnippets::openai_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Trait for types that can be requested as OpenAI structured output.
///
/// Blanket-implemented for any `JsonSchema + DeserializeOwned` type.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Strict-mode schema for this type.
    fn openai_schema() -> Value {
        let schema = serde_json::to_value(schema_for!(Self)).unwrap_or_default();
        into_strict_schema(schema)
    }

    /// Schema name accepted by the API (`[a-zA-Z0-9_-]`, at most 64 chars).
    fn openai_schema_name() -> String {
        sanitize_schema_name(&<Self as JsonSchema>::schema_name())
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Rewrite a schemars root schema into the strict subset.
pub fn into_strict_schema(mut root: Value) -> Value {
    let definitions = match &mut root {
        Value::Object(map) => {
            map.remove("$schema");
            map.remove("definitions")
        }
        _ => None,
    };

    if let Some(defs) = definitions {
        inline_refs(&mut root, &defs);
    }
    close_objects(&mut root);
    root
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
                if let Some(Value::Object(props)) = map.get("properties") {
                    let required = props.keys().cloned().map(Value::String).collect();
                    map.insert("required".to_string(), Value::Array(required));
                }
            }
            for child in map.values_mut() {
                close_objects(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(close_objects),
        _ => {}
    }
}

fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(resolved) = resolve_ref(map, definitions) {
                *value = resolved;
                inline_refs(value, definitions);
                return;
            }
            for child in map.values_mut() {
                inline_refs(child, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

fn resolve_ref(map: &Map<String, Value>, definitions: &Value) -> Option<Value> {
    let name = map
        .get("$ref")?
        .as_str()?
        .strip_prefix("#/definitions/")?;
    definitions.get(name).cloned()
}

fn sanitize_schema_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect();

    if cleaned.is_empty() {
        "structured_response".to_string()
    } else {
        cleaned
    }
}
