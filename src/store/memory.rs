//! # In-Memory Store
//!
//! `SecretStore` backed by a map behind a lock. Used by tests and by
//! callers embedding the engine without a real store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::backend::{SecretStore, Tags};
use super::errors::{StoreError, StoreResult};
use crate::partition::{parse_part_name, PartIndex};

#[derive(Debug, Clone)]
struct StoredRecord {
    payload: Vec<u8>,
    tags: Tags,
}

/// In-memory secret store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, StoredRecord>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upserts performed, for asserting write-free failure paths.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// All record names currently stored, sorted.
    pub fn record_names(&self) -> StoreResult<Vec<String>> {
        let records = self.read_guard()?;
        let mut names: Vec<String> = records.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Tags of a stored record, if present.
    pub fn tags_of(&self, name: &str) -> StoreResult<Option<Tags>> {
        let records = self.read_guard()?;
        Ok(records.get(name).map(|r| r.tags.clone()))
    }

    fn read_guard(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, StoredRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }
}

impl SecretStore for MemoryStore {
    fn list_parts(&self, base: &str) -> StoreResult<Vec<PartIndex>> {
        let records = self.read_guard()?;
        Ok(records
            .keys()
            .filter_map(|name| parse_part_name(base, name))
            .collect())
    }

    fn fetch_part(&self, name: &str) -> StoreResult<Vec<u8>> {
        let records = self.read_guard()?;
        records
            .get(name)
            .map(|r| r.payload.clone())
            .ok_or_else(|| StoreError::PartNotFound(name.to_string()))
    }

    fn upsert_part(&self, name: &str, payload: &[u8], tags: &Tags) -> StoreResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        match records.get_mut(name) {
            // Overwrite keeps the tags from creation.
            Some(record) => record.payload = payload.to_vec(),
            None => {
                records.insert(
                    name.to_string(),
                    StoredRecord {
                        payload: payload.to_vec(),
                        tags: tags.clone(),
                    },
                );
            }
        }
        Ok(())
    }
}
