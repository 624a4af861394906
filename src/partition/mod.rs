//! # Partitioning & Redistribution
//!
//! Deterministic splitting of the logical document into size-bounded
//! chunks, and mapping of those chunks back onto physical part slots.

pub mod allocator;
pub mod chunker;
pub mod errors;
pub mod naming;

pub use allocator::{assign_slots, PartAssignment};
pub use chunker::{
    partition, Chunk, PartitionConfig, DEFAULT_MAX_CHUNK_BYTES, DEFAULT_MAX_OVERFLOW_PARTS,
};
pub use errors::{PartitionError, PartitionResult};
pub use naming::{clean_base_name, parse_part_name, part_name, PartIndex};
