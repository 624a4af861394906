//! # Chunker
//!
//! Splits the logical document into an ordered sequence of size-bounded
//! chunks. Greedy first-fit over lexicographically sorted keys: not
//! byte-optimal, but a pure function of the key set and values, so
//! repeated runs over identical data produce identical part layouts.

use std::collections::BTreeMap;

use serde_json::Value;

use super::errors::{PartitionError, PartitionResult};
use crate::document::LogicalDocument;

/// One size-bounded fragment of the logical document.
pub type Chunk = LogicalDocument;

/// Default serialized size limit per part record: 50 KiB.
pub const DEFAULT_MAX_CHUNK_BYTES: usize = 50 * 1024;

/// Default cap on overflow part indices. Soft policy, not a structural limit.
pub const DEFAULT_MAX_OVERFLOW_PARTS: u32 = 5;

/// Limits applied while chunking and allocating part slots.
#[derive(Debug, Clone, Copy)]
pub struct PartitionConfig {
    /// Max serialized size of one chunk, in bytes.
    pub max_chunk_bytes: usize,

    /// Highest overflow part index the allocator may create.
    pub max_overflow_parts: u32,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            max_chunk_bytes: DEFAULT_MAX_CHUNK_BYTES,
            max_overflow_parts: DEFAULT_MAX_OVERFLOW_PARTS,
        }
    }
}

/// Split the document into chunks whose serialized size stays within the
/// configured limit.
///
/// A single key-value pair that alone exceeds the limit can never fit in
/// any chunk and fails with `KeyTooLarge`; values are never split.
pub fn partition(
    document: &LogicalDocument,
    config: &PartitionConfig,
) -> PartitionResult<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut current: BTreeMap<&str, &Value> = BTreeMap::new();

    for (key, value) in document {
        let mut single = BTreeMap::new();
        single.insert(key.as_str(), value);
        let single_size = encoded_size(&single)?;
        if single_size > config.max_chunk_bytes {
            return Err(PartitionError::KeyTooLarge {
                key: key.clone(),
                size: single_size,
                limit: config.max_chunk_bytes,
            });
        }

        current.insert(key.as_str(), value);
        if encoded_size(&current)? > config.max_chunk_bytes && current.len() > 1 {
            // The accumulator held keys before this one: close it and
            // start the next chunk with this key alone.
            current.remove(key.as_str());
            chunks.push(materialize(&current));
            current.clear();
            current.insert(key.as_str(), value);
        }
    }

    if !current.is_empty() {
        chunks.push(materialize(&current));
    }

    Ok(chunks)
}

/// Serialized size of a chunk, measured from the same canonical encoding
/// used when the chunk is persisted.
fn encoded_size(chunk: &BTreeMap<&str, &Value>) -> PartitionResult<usize> {
    serde_json::to_vec(chunk)
        .map(|bytes| bytes.len())
        .map_err(|e| PartitionError::Encode(e.to_string()))
}

fn materialize(chunk: &BTreeMap<&str, &Value>) -> Chunk {
    chunk
        .iter()
        .map(|(key, value)| (key.to_string(), (*value).clone()))
        .collect()
}
