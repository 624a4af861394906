//! # Local Filesystem Store
//!
//! `SecretStore` backed by a directory: one `<name>.json` payload file per
//! part, plus a `<name>.meta.json` sidecar holding the provenance tags and
//! creation/update timestamps. Overwrites keep the creation metadata and
//! bump the update stamp.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::backend::{SecretStore, Tags};
use super::errors::{StoreError, StoreResult};
use crate::partition::{parse_part_name, PartIndex};

const PAYLOAD_SUFFIX: &str = ".json";
const META_SUFFIX: &str = ".meta.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PartMetadata {
    tags: Tags,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Filesystem-backed secret store rooted at one directory.
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Unavailable(format!("cannot create store root: {}", e)))?;
        Ok(Self { root })
    }

    fn payload_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}{}", name, PAYLOAD_SUFFIX))
    }

    fn meta_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}{}", name, META_SUFFIX))
    }

    fn load_metadata(&self, name: &str) -> Option<PartMetadata> {
        let bytes = fs::read(self.meta_path(name)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Record names present in the store, relative to the root.
    fn record_names(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        collect_names(&self.root, "", &mut names)?;
        Ok(names)
    }
}

fn collect_names(dir: &Path, prefix: &str, names: &mut Vec<String>) -> StoreResult<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| StoreError::Unavailable(format!("cannot list store: {}", e)))?;
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        let relative = if prefix.is_empty() {
            file_name.clone()
        } else {
            format!("{}/{}", prefix, file_name)
        };
        let path = entry.path();
        if path.is_dir() {
            collect_names(&path, &relative, names)?;
        } else if !relative.ends_with(META_SUFFIX) {
            if let Some(name) = relative.strip_suffix(PAYLOAD_SUFFIX) {
                names.push(name.to_string());
            }
        }
    }
    Ok(())
}

impl SecretStore for LocalStore {
    fn list_parts(&self, base: &str) -> StoreResult<Vec<PartIndex>> {
        Ok(self
            .record_names()?
            .iter()
            .filter_map(|name| parse_part_name(base, name))
            .collect())
    }

    fn fetch_part(&self, name: &str) -> StoreResult<Vec<u8>> {
        fs::read(self.payload_path(name)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::PartNotFound(name.to_string())
            } else {
                StoreError::Unavailable(e.to_string())
            }
        })
    }

    fn upsert_part(&self, name: &str, payload: &[u8], tags: &Tags) -> StoreResult<()> {
        let now = Utc::now();
        let metadata = match self.load_metadata(name) {
            Some(existing) => PartMetadata {
                updated_at: now,
                ..existing
            },
            None => PartMetadata {
                tags: tags.clone(),
                created_at: now,
                updated_at: now,
            },
        };

        let payload_path = self.payload_path(name);
        if let Some(parent) = payload_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        let meta_bytes = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        // Payload first: a failed write must not leave a sidecar behind
        // for a later create to adopt.
        fs::write(&payload_path, payload).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        fs::write(self.meta_path(name), meta_bytes)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tags(env: &str) -> Tags {
        let mut tags = Tags::new();
        tags.insert("env".to_string(), env.to_string());
        tags
    }

    #[test]
    fn test_upsert_and_fetch() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.upsert_part("app", b"{\"a\":\"1\"}", &tags("staging")).unwrap();
        assert_eq!(store.fetch_part("app").unwrap(), b"{\"a\":\"1\"}");
    }

    #[test]
    fn test_fetch_missing_is_part_not_found() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        assert_eq!(
            store.fetch_part("nope").unwrap_err(),
            StoreError::PartNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_list_parts_ignores_foreign_records() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        for name in ["app", "app-1", "app-backup", "other-2"] {
            store.upsert_part(name, b"{}", &Tags::new()).unwrap();
        }
        let mut indices = store.list_parts("app").unwrap();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_overwrite_is_idempotent_and_keeps_tags() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.upsert_part("app", b"{\"a\":1}", &tags("staging")).unwrap();
        let created = store.load_metadata("app").unwrap();

        store.upsert_part("app", b"{\"a\":2}", &tags("prod")).unwrap();
        let updated = store.load_metadata("app").unwrap();

        assert_eq!(store.fetch_part("app").unwrap(), b"{\"a\":2}");
        assert_eq!(updated.tags, created.tags, "tags are set at creation only");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_failed_payload_write_leaves_no_sidecar() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        // A directory squatting on the payload path makes the write fail.
        fs::create_dir(temp.path().join("app.json")).unwrap();

        let err = store.upsert_part("app", b"{}", &tags("staging")).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(
            !temp.path().join("app.meta.json").exists(),
            "a failed create must not leave metadata for a later create to adopt"
        );
    }

    #[test]
    fn test_nested_record_names() {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::open(temp.path()).unwrap();

        store.upsert_part("team/app", b"{}", &Tags::new()).unwrap();
        store.upsert_part("team/app-1", b"{}", &Tags::new()).unwrap();

        let mut indices = store.list_parts("team/app").unwrap();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(store.fetch_part("team/app-1").unwrap(), b"{}");
    }
}
