//! # Part Merging
//!
//! Folds the raw payloads of all physical parts back into one logical
//! document. Parts must arrive in ascending index order; the first part
//! that re-introduces an already-merged key is reported, never overwritten.

use serde_json::Value;

use super::errors::{DocumentError, DocumentResult};
use super::LogicalDocument;

/// Merge part payloads, in ascending index order, into one document.
///
/// Each payload must parse to a non-empty JSON object. A key appearing in
/// two different parts means the stored parts have diverged and is a hard
/// error rather than a silent overwrite.
pub fn merge_parts(parts: &[(String, Vec<u8>)]) -> DocumentResult<LogicalDocument> {
    let mut merged = LogicalDocument::new();

    for (name, payload) in parts {
        let parsed: Value =
            serde_json::from_slice(payload).map_err(|e| DocumentError::MalformedPart {
                part: name.clone(),
                reason: e.to_string(),
            })?;

        let object = match parsed {
            Value::Object(object) => object,
            other => {
                return Err(DocumentError::MalformedPart {
                    part: name.clone(),
                    reason: format!("expected a JSON object, got {}", json_type_name(&other)),
                })
            }
        };

        if object.is_empty() {
            return Err(DocumentError::EmptyPart { part: name.clone() });
        }

        for (key, value) in object {
            if merged.contains_key(&key) {
                return Err(DocumentError::DuplicateKey {
                    key,
                    part: name.clone(),
                });
            }
            merged.insert(key, value);
        }
    }

    Ok(merged)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
