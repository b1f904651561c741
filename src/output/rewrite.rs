// src/output/rewrite.rs
// =============================================================================
// Replaces references to mirrored URLs with their local file paths.
//
// Any string value that is exactly a key of the filename map becomes
// "<base_url>/<filename>" (or just "<filename>" without a base URL).
// Everything else, including object keys, is copied unchanged.
// =============================================================================

use serde_json::{Map, Value};

use super::filename::FilenameMap;

/// Returns a rewritten copy of `document`; the input is not modified.
///
/// `base_url` is expected without a trailing slash; an empty string
/// means references become bare relative paths.
pub fn rewrite_document(document: &Value, filenames: &FilenameMap, base_url: &str) -> Value {
    match document {
        Value::String(s) => match filenames.get(s) {
            Some(filename) if base_url.is_empty() => Value::String(filename.to_string()),
            Some(filename) => Value::String(format!("{base_url}/{filename}")),
            None => document.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rewrite_document(item, filenames, base_url))
                .collect(),
        ),
        Value::Object(fields) => {
            let mut rewritten = Map::with_capacity(fields.len());
            for (key, value) in fields {
                rewritten.insert(key.clone(), rewrite_document(value, filenames, base_url));
            }
            Value::Object(rewritten)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => document.clone(),
    }
}
