//! # Engine Errors
//!
//! One error type for the whole read-modify-write cycle, wrapping the
//! subsystem errors unchanged. Any error aborts the operation before the
//! first write is issued.

use thiserror::Error;

use crate::document::DocumentError;
use crate::partition::PartitionError;
use crate::store::StoreError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from a full mutation or find run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
