//! # Secret Store Trait
//!
//! The seam between the partitioning engine and whatever actually holds
//! the records. The engine performs no retries; store errors propagate
//! unchanged.

use std::collections::BTreeMap;

use super::errors::StoreResult;
use crate::partition::{part_name, PartIndex};

/// Flat provenance tags applied when a part record is first created.
/// Opaque to the engine.
pub type Tags = BTreeMap<String, String>;

/// A store holding the physical part records of logical documents.
pub trait SecretStore: Send + Sync {
    /// Part indices currently present for `base`, recognized via the
    /// naming-scheme inverse. Unordered, no duplicates expected.
    fn list_parts(&self, base: &str) -> StoreResult<Vec<PartIndex>>;

    /// Raw payload of one part record.
    fn fetch_part(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Create the record with `tags`, or overwrite its payload if it
    /// already exists. Must be idempotent for identical input.
    fn upsert_part(&self, name: &str, payload: &[u8], tags: &Tags) -> StoreResult<()>;

    /// Fetch the payloads of the given part indices of `base`, preserving
    /// the input order. Fails if any requested part is missing.
    fn fetch_parts(
        &self,
        base: &str,
        indices: &[PartIndex],
    ) -> StoreResult<Vec<(PartIndex, Vec<u8>)>> {
        let mut parts = Vec::with_capacity(indices.len());
        for &index in indices {
            let payload = self.fetch_part(&part_name(base, index))?;
            parts.push((index, payload));
        }
        Ok(parts)
    }
}
