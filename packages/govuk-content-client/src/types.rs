use serde::Serialize;
use serde_json::Value;

/// One raw Content API response, keyed by the path it was requested for.
///
/// The payload is kept untyped: callers reconcile it against their own schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub path: String,
    pub payload: Value,
}

impl ContentItem {
    pub fn new(path: impl Into<String>, payload: Value) -> Self {
        Self {
            path: path.into(),
            payload,
        }
    }

    pub fn document_type(&self) -> Option<&str> {
        self.payload.get("document_type").and_then(Value::as_str)
    }
}
