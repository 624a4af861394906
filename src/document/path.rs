//! # Dot-Path Lookup
//!
//! Read-only structural descent through a parsed JSON tree, used by the
//! `find` operation to locate which part holds a given key path.

use serde_json::Value;

/// Resolve a dot-separated path against a JSON value.
///
/// Returns `None` as soon as a segment is absent or the current value is
/// not an object that can be descended into.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
