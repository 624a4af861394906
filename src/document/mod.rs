//! # Logical Document
//!
//! One key-value secret document, reassembled from its physical parts.
//! Keys are unique and the map is ordered by key, so every size- or
//! identity-sensitive operation downstream sees a deterministic view.

use std::collections::BTreeMap;

use serde_json::Value;

pub mod errors;
pub mod merge;
pub mod mutate;
pub mod path;

pub use errors::{DocumentError, DocumentResult};
pub use merge::merge_parts;
pub use mutate::{apply_mutation, MutationRequest};
pub use path::lookup;

/// The merged key-value document. Ordered by key; values are arbitrary JSON.
pub type LogicalDocument = BTreeMap<String, Value>;
