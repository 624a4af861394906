//! # Slot Allocator
//!
//! Maps the chunk sequence onto physical part slots. Existing slots are
//! reused in ascending index order; chunks past the end get new indices
//! strictly above the highest existing one. Producing fewer chunks than
//! existing parts is refused, since the surplus parts would keep stale
//! keys the store no longer knows about.

use super::chunker::{Chunk, PartitionConfig};
use super::errors::{PartitionError, PartitionResult};
use super::naming::{part_name, PartIndex};

/// One chunk bound to the physical slot that will receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartAssignment {
    pub index: PartIndex,
    pub name: String,
    pub chunk: Chunk,
}

/// Assign each chunk a part slot.
///
/// `existing` is the set of part indices currently in the store, in any
/// order. Slot reuse is positional: a chunk's contents may move between
/// physical slots across runs; only the slot count and naming stay stable.
pub fn assign_slots(
    base: &str,
    existing: &[PartIndex],
    chunks: Vec<Chunk>,
    config: &PartitionConfig,
) -> PartitionResult<Vec<PartAssignment>> {
    let mut slots = existing.to_vec();
    slots.sort_unstable();
    slots.dedup();

    if chunks.len() < slots.len() {
        return Err(PartitionError::InsufficientChunks {
            chunks: chunks.len(),
            parts: slots.len(),
        });
    }

    let highest = slots.last().copied();
    let mut assignments = Vec::with_capacity(chunks.len());

    for (position, chunk) in chunks.into_iter().enumerate() {
        let index = if position < slots.len() {
            slots[position]
        } else {
            let offset = (position - slots.len()) as PartIndex;
            let index = match highest {
                Some(highest) => highest + 1 + offset,
                None => offset,
            };
            if index > config.max_overflow_parts {
                return Err(PartitionError::PartLimitExceeded {
                    index,
                    limit: config.max_overflow_parts,
                });
            }
            index
        };

        assignments.push(PartAssignment {
            index,
            name: part_name(base, index),
            chunk,
        });
    }

    Ok(assignments)
}
