//! # Redistribution Engine
//!
//! Orchestrates one read-modify-write cycle over a multipart secret:
//! list parts, fetch, merge, mutate, re-chunk, and write every chunk back
//! to its slot. All validation and chunking happens before the first
//! upsert, so a failed run leaves the store untouched.
//!
//! Single-threaded and stateless between runs; every invocation
//! re-fetches the full current state. Concurrent runs against the same
//! base name are unsupported.

use serde_json::Value;

use super::errors::{EngineError, EngineResult};
use crate::document::{apply_mutation, lookup, merge_parts, DocumentError, MutationRequest};
use crate::observability::{Logger, Severity};
use crate::partition::{
    assign_slots, clean_base_name, part_name, partition, PartIndex, PartitionConfig,
    PartitionError,
};
use crate::store::{SecretStore, Tags};

/// Result of a successful mutation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Total keys in the logical document after the mutation.
    pub key_count: usize,
    /// Total part records after redistribution.
    pub part_count: usize,
}

/// Location of a key path found by [`Engine::run_find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindMatch {
    pub index: PartIndex,
    pub name: String,
}

/// The partitioning and redistribution engine. Holds no state between
/// calls; the store is the only collaborator.
pub struct Engine<'a> {
    store: &'a dyn SecretStore,
    config: PartitionConfig,
}

impl<'a> Engine<'a> {
    pub fn new(store: &'a dyn SecretStore, config: PartitionConfig) -> Self {
        Self { store, config }
    }

    /// Apply a mutation to the logical document stored under `base` and
    /// redistribute the result across its part records.
    pub fn run_mutation(
        &self,
        base: &str,
        request: &MutationRequest,
        tags: &Tags,
    ) -> EngineResult<MutationOutcome> {
        let base = clean_base_name(base)?;
        Logger::log(Severity::Info, "mutation_start", &[("base", base.as_str())]);
        let indices = self.existing_indices(&base)?;

        let fetched = self.store.fetch_parts(&base, &indices)?;
        let named: Vec<(String, Vec<u8>)> = fetched
            .into_iter()
            .map(|(index, payload)| (part_name(&base, index), payload))
            .collect();

        let mut document = merge_parts(&named)?;
        apply_mutation(&mut document, request)?;

        let chunks = partition(&document, &self.config)?;
        let assignments = assign_slots(&base, &indices, chunks, &self.config)?;

        for assignment in &assignments {
            let payload = serde_json::to_vec(&assignment.chunk)
                .map_err(|e| PartitionError::Encode(e.to_string()))?;
            self.store.upsert_part(&assignment.name, &payload, tags)?;
        }

        let outcome = MutationOutcome {
            key_count: document.len(),
            part_count: assignments.len(),
        };
        let keys = outcome.key_count.to_string();
        let parts = outcome.part_count.to_string();
        Logger::log(
            Severity::Info,
            "mutation_complete",
            &[
                ("base", base.as_str()),
                ("keys", keys.as_str()),
                ("parts", parts.as_str()),
            ],
        );
        Ok(outcome)
    }

    /// Scan parts in ascending index order for the first one whose
    /// payload contains a value at `key_path`.
    pub fn run_find(&self, base: &str, key_path: &str) -> EngineResult<Option<FindMatch>> {
        let base = clean_base_name(base)?;
        let indices = self.existing_indices(&base)?;

        for &index in &indices {
            let name = part_name(&base, index);
            let payload = self.store.fetch_part(&name)?;
            let parsed: Value =
                serde_json::from_slice(&payload).map_err(|e| DocumentError::MalformedPart {
                    part: name.clone(),
                    reason: e.to_string(),
                })?;
            if !parsed.is_object() {
                return Err(DocumentError::MalformedPart {
                    part: name,
                    reason: "expected a JSON object".to_string(),
                }
                .into());
            }
            if lookup(&parsed, key_path).is_some() {
                return Ok(Some(FindMatch { index, name }));
            }
        }
        Ok(None)
    }

    /// Current part indices of `base`, sorted ascending.
    fn existing_indices(&self, base: &str) -> EngineResult<Vec<PartIndex>> {
        let mut indices = self.store.list_parts(base)?;
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }
}
