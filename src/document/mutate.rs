//! # Document Mutation
//!
//! Applies a requested change to the merged document under strict conflict
//! rules. Every key is validated before the first write, so a request
//! either fully applies or leaves the document untouched.
//!
//! Two modes:
//! - Flat: keys merge at the document root.
//! - Path: keys merge into the object found at a dot-separated path.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::errors::{DocumentError, DocumentResult};
use super::LogicalDocument;

/// A requested change to the logical document.
#[derive(Debug, Clone)]
pub struct MutationRequest {
    /// Keys and values to merge.
    pub entries: BTreeMap<String, Value>,

    /// Dot-separated path to the nested object that receives the entries.
    /// `None` merges at the document root.
    pub key_path: Option<String>,

    /// When false, every entry key must be absent (pure add).
    /// When true, every entry key must already exist (pure overwrite).
    pub force_update: bool,
}

impl MutationRequest {
    /// Pure-add request at the document root.
    pub fn add(entries: BTreeMap<String, Value>) -> Self {
        Self {
            entries,
            key_path: None,
            force_update: false,
        }
    }

    /// Pure-overwrite request at the document root.
    pub fn update(entries: BTreeMap<String, Value>) -> Self {
        Self {
            entries,
            key_path: None,
            force_update: true,
        }
    }

    /// Scope this request to the object at a dot-separated path.
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.key_path = Some(path.into());
        self
    }
}

/// Apply a mutation request to the document.
pub fn apply_mutation(
    document: &mut LogicalDocument,
    request: &MutationRequest,
) -> DocumentResult<()> {
    match &request.key_path {
        None => apply_flat(document, &request.entries, request.force_update),
        Some(path) => apply_at_path(document, path, &request.entries, request.force_update),
    }
}

fn apply_flat(
    document: &mut LogicalDocument,
    entries: &BTreeMap<String, Value>,
    force_update: bool,
) -> DocumentResult<()> {
    // Validate every key before the first write.
    for key in entries.keys() {
        let present = document.contains_key(key);
        if !force_update && present {
            return Err(DocumentError::KeyExists(key.clone()));
        }
        if force_update && !present {
            return Err(DocumentError::KeyMissing(key.clone()));
        }
    }

    for (key, value) in entries {
        document.insert(key.clone(), value.clone());
    }
    Ok(())
}

fn apply_at_path(
    document: &mut LogicalDocument,
    path: &str,
    entries: &BTreeMap<String, Value>,
    force_update: bool,
) -> DocumentResult<()> {
    let target = resolve_object_mut(document, path)?;

    for key in entries.keys() {
        let present = target.contains_key(key);
        if !force_update && present {
            return Err(DocumentError::KeyExists(format!("{}.{}", path, key)));
        }
        if force_update && !present {
            return Err(DocumentError::KeyMissing(format!("{}.{}", path, key)));
        }
    }

    for (key, value) in entries {
        target.insert(key.clone(), value.clone());
    }
    Ok(())
}

/// Descend through the document one path segment at a time, requiring a
/// JSON object at every step, and return the object at the full path.
fn resolve_object_mut<'a>(
    document: &'a mut LogicalDocument,
    path: &str,
) -> DocumentResult<&'a mut Map<String, Value>> {
    let mut segments = path.split('.');
    let first = segments.next().unwrap_or_default();

    let mut current = document
        .get_mut(first)
        .ok_or_else(|| DocumentError::PathSegmentMissing {
            segment: first.to_string(),
            path: path.to_string(),
        })?;
    let mut resolved = first.to_string();

    for segment in segments {
        let object = match current {
            Value::Object(object) => object,
            _ => {
                return Err(DocumentError::PathSegmentNotObject {
                    segment: resolved,
                    path: path.to_string(),
                })
            }
        };
        current = object
            .get_mut(segment)
            .ok_or_else(|| DocumentError::PathSegmentMissing {
                segment: segment.to_string(),
                path: path.to_string(),
            })?;
        resolved = format!("{}.{}", resolved, segment);
    }

    match current {
        Value::Object(object) => Ok(object),
        _ => Err(DocumentError::PathSegmentNotObject {
            segment: resolved,
            path: path.to_string(),
        }),
    }
}
