//! Sensitive-data redaction for diagnostic log payloads.

use serde_json::{Map, Value};

/// Replacement for values whose key names look sensitive.
pub const SENSITIVE_SENTINEL: &str = "[SENSITIVE_DATA]";

const SENSITIVE_KEY_PATTERNS: [&str; 6] = [
    "password",
    "token",
    "secret",
    "key",
    "api_key",
    "private_key",
];

/// Whether a property key should be redacted (case-insensitive substring
/// match against the sensitive patterns).
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_KEY_PATTERNS
        .iter()
        .any(|pattern| key.contains(pattern))
}

/// Redact sensitive entries from a property map, recursing through
/// nested maps and arrays. The input is left untouched; log payloads are
/// built from the returned copy.
pub fn sanitize_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            if is_sensitive_key(key) {
                (key.clone(), Value::String(SENSITIVE_SENTINEL.to_string()))
            } else {
                (key.clone(), sanitize_value(value))
            }
        })
        .collect()
}

fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sanitize_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        other => other.clone(),
    }
}
