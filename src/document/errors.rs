//! # Document Errors
//!
//! Failures raised while merging part payloads into one logical document
//! and while applying mutations to it.

use thiserror::Error;

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Document merge and mutation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    // Merge errors
    #[error("Part '{part}' is not a JSON object: {reason}")]
    MalformedPart { part: String, reason: String },

    #[error("Part '{part}' contains an empty JSON object")]
    EmptyPart { part: String },

    #[error("Duplicate key '{key}' found in part '{part}'")]
    DuplicateKey { key: String, part: String },

    // Mutation errors
    #[error("Key already exists: {0}")]
    KeyExists(String),

    #[error("Key does not exist: {0}")]
    KeyMissing(String),

    #[error("Path segment '{segment}' not found while resolving '{path}'")]
    PathSegmentMissing { segment: String, path: String },

    #[error("Path segment '{segment}' in '{path}' is not a JSON object")]
    PathSegmentNotObject { segment: String, path: String },
}
