//! End-to-End Engine Tests
//!
//! Full read-modify-write cycles against the in-memory store, covering
//! the documented behavior contract: merge conflicts, mutation conflict
//! symmetry, path-scoped mutation, split/merge round-trips, and find.

use std::collections::BTreeMap;

use multisecret::document::{merge_parts, MutationRequest};
use multisecret::engine::Engine;
use multisecret::partition::{part_name, PartitionConfig};
use multisecret::store::{MemoryStore, SecretStore, Tags};
use serde_json::{json, Value};

// =============================================================================
// Test Utilities
// =============================================================================

fn entries(raw: &str) -> BTreeMap<String, Value> {
    serde_json::from_str(raw).unwrap()
}

fn seed(store: &MemoryStore, name: &str, payload: &str) {
    store
        .upsert_part(name, payload.as_bytes(), &Tags::new())
        .unwrap();
}

fn engine(store: &MemoryStore) -> Engine<'_> {
    Engine::new(store, PartitionConfig::default())
}

fn parse(store: &MemoryStore, name: &str) -> Value {
    serde_json::from_slice(&store.fetch_part(name).unwrap()).unwrap()
}

// =============================================================================
// Basic add scenario
// =============================================================================

/// Adding {"b":"2"} to {"a":"1"} keeps one part and yields two keys.
#[test]
fn test_add_keeps_single_part() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"a": "1"}"#);

    let outcome = engine(&store)
        .run_mutation(
            "app",
            &MutationRequest::add(entries(r#"{"b": "2"}"#)),
            &Tags::new(),
        )
        .unwrap();

    assert_eq!(outcome.key_count, 2);
    assert_eq!(outcome.part_count, 1);
    assert_eq!(parse(&store, "app"), json!({"a": "1", "b": "2"}));
}

// =============================================================================
// Conflict symmetry
// =============================================================================

/// Per key, exactly one of add/update succeeds: add requires absence,
/// update requires presence.
#[test]
fn test_add_and_update_are_mutually_exclusive_per_key() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"present": "1"}"#);
    let eng = engine(&store);

    let add_present = eng.run_mutation(
        "app",
        &MutationRequest::add(entries(r#"{"present": "x"}"#)),
        &Tags::new(),
    );
    assert!(add_present.unwrap_err().to_string().contains("already exists"));

    let update_absent = eng.run_mutation(
        "app",
        &MutationRequest::update(entries(r#"{"absent": "x"}"#)),
        &Tags::new(),
    );
    assert!(update_absent.unwrap_err().to_string().contains("does not exist"));

    let add_absent = eng.run_mutation(
        "app",
        &MutationRequest::add(entries(r#"{"absent": "x"}"#)),
        &Tags::new(),
    );
    assert!(add_absent.is_ok());

    let update_present = eng.run_mutation(
        "app",
        &MutationRequest::update(entries(r#"{"present": "2"}"#)),
        &Tags::new(),
    );
    assert!(update_present.is_ok());
    assert_eq!(parse(&store, "app")["present"], json!("2"));
}

// =============================================================================
// Path mode
// =============================================================================

#[test]
fn test_path_add_merges_into_nested_object() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"Db": {"User": "x"}}"#);

    engine(&store)
        .run_mutation(
            "app",
            &MutationRequest::add(entries(r#"{"Pass": "y"}"#)).at_path("Db"),
            &Tags::new(),
        )
        .unwrap();

    assert_eq!(parse(&store, "app"), json!({"Db": {"User": "x", "Pass": "y"}}));
}

#[test]
fn test_path_add_missing_segment_fails() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"Db": {"User": "x"}}"#);

    let err = engine(&store)
        .run_mutation(
            "app",
            &MutationRequest::add(entries(r#"{"k": "v"}"#)).at_path("Missing.Key"),
            &Tags::new(),
        )
        .unwrap_err();

    assert!(err.to_string().contains("'Missing'"));
}

// =============================================================================
// Merge failures
// =============================================================================

#[test]
fn test_duplicate_key_across_parts_aborts() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"dup": "1"}"#);
    seed(&store, "app-1", r#"{"dup": "2"}"#);

    let err = engine(&store)
        .run_mutation(
            "app",
            &MutationRequest::add(entries(r#"{"x": "y"}"#)),
            &Tags::new(),
        )
        .unwrap_err();

    assert!(err.to_string().contains("Duplicate key 'dup'"));
}

#[test]
fn test_empty_part_aborts() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"a": "1"}"#);
    seed(&store, "app-1", "{}");

    let err = engine(&store)
        .run_mutation(
            "app",
            &MutationRequest::add(entries(r#"{"x": "y"}"#)),
            &Tags::new(),
        )
        .unwrap_err();

    assert!(err.to_string().contains("empty JSON object"));
}

// =============================================================================
// Round-trip: split, then merge back
// =============================================================================

/// Writing a document that splits into several parts and re-merging those
/// parts yields the original key set and values.
#[test]
fn test_split_then_merge_round_trip() {
    let store = MemoryStore::new();
    let config = PartitionConfig {
        max_chunk_bytes: 80,
        ..PartitionConfig::default()
    };
    let eng = Engine::new(&store, config);

    let mut payload = BTreeMap::new();
    for i in 0..12 {
        payload.insert(format!("key-{:02}", i), json!("v".repeat(25)));
    }
    let raw = serde_json::to_string(&payload).unwrap();

    let outcome = eng
        .run_mutation("app", &MutationRequest::add(entries(&raw)), &Tags::new())
        .unwrap();
    assert!(outcome.part_count > 1, "test document must actually split");

    let mut indices = store.list_parts("app").unwrap();
    indices.sort_unstable();
    let named: Vec<(String, Vec<u8>)> = indices
        .iter()
        .map(|&i| {
            let name = part_name("app", i);
            let bytes = store.fetch_part(&name).unwrap();
            (name, bytes)
        })
        .collect();

    let merged = merge_parts(&named).unwrap();
    assert_eq!(merged.len(), 12);
    for (key, value) in &payload {
        assert_eq!(merged.get(key), Some(value));
    }
}

/// A second identical run rewrites the same layout: same part count, same
/// bytes in every part.
#[test]
fn test_rerun_is_layout_stable() {
    let store = MemoryStore::new();
    let config = PartitionConfig {
        max_chunk_bytes: 80,
        ..PartitionConfig::default()
    };

    let mut payload = BTreeMap::new();
    for i in 0..8 {
        payload.insert(format!("key-{:02}", i), json!("v".repeat(25)));
    }
    let raw = serde_json::to_string(&payload).unwrap();

    Engine::new(&store, config)
        .run_mutation("app", &MutationRequest::add(entries(&raw)), &Tags::new())
        .unwrap();
    let before: Vec<(String, Vec<u8>)> = store
        .record_names()
        .unwrap()
        .into_iter()
        .map(|n| (n.clone(), store.fetch_part(&n).unwrap()))
        .collect();

    // Overwrite one key with its existing value: document is unchanged.
    let update = format!(r#"{{"key-00": "{}"}}"#, "v".repeat(25));
    Engine::new(&store, config)
        .run_mutation("app", &MutationRequest::update(entries(&update)), &Tags::new())
        .unwrap();

    for (name, bytes) in before {
        assert_eq!(
            store.fetch_part(&name).unwrap(),
            bytes,
            "part '{}' changed across identical runs",
            name
        );
    }
}

// =============================================================================
// Find
// =============================================================================

#[test]
fn test_find_reports_first_matching_part() {
    let store = MemoryStore::new();
    seed(&store, "app", r#"{"a": "1"}"#);
    seed(&store, "app-1", r#"{"Db": {"Creds": {"User": "x"}}}"#);

    let eng = engine(&store);
    let found = eng.run_find("app", "Db.Creds.User").unwrap().unwrap();
    assert_eq!(found.name, "app-1");
    assert_eq!(found.index, 1);

    assert!(eng.run_find("app", "Db.Creds.Pass").unwrap().is_none());
}
