//! # Store Errors

use thiserror::Error;

/// Result type for secret store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a secret store collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}
