//! # Partition Errors

use thiserror::Error;

use super::naming::PartIndex;

/// Result type for partitioning and slot allocation
pub type PartitionResult<T> = Result<T, PartitionError>;

/// Chunking and slot allocation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Key '{key}' exceeds max chunk size ({limit} bytes): got {size}")]
    KeyTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error(
        "Number of new chunks ({chunks}) is less than existing parts ({parts}); \
         this would leave stale keys in orphaned parts, delete extra parts manually first"
    )]
    InsufficientChunks { chunks: usize, parts: usize },

    #[error("Allocation would create part index {index}, above the overflow part limit of {limit}")]
    PartLimitExceeded { index: PartIndex, limit: u32 },

    #[error("'{0}' is a multipart part name; provide the base secret name instead")]
    MultipartNameGiven(String),

    #[error("Failed to encode chunk: {0}")]
    Encode(String),
}
