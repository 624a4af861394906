//! CLI command implementations
//!
//! Thin glue between the parsed arguments and the engine: validate the
//! input shape, open the store, build provenance tags, run, report.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::document::MutationRequest;
use crate::engine::Engine;
use crate::observability::{Logger, Severity};
use crate::partition::PartitionConfig;
use crate::store::{LocalStore, Tags};

use super::args::{Cli, Command, MutationArgs};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Add { args } => mutate(args, false),
        Command::Update { args } => mutate(args, true),
        Command::Find {
            store_dir,
            secret_name,
            key_path,
        } => {
            validate_key_path(&key_path)?;
            let store = LocalStore::open(store_dir)?;
            let engine = Engine::new(&store, PartitionConfig::default());
            match engine.run_find(&secret_name, &key_path)? {
                Some(found) => {
                    println!("Key path '{}' found in part '{}'", key_path, found.name);
                }
                None => {
                    println!(
                        "Key path '{}' not found in any part of '{}'",
                        key_path, secret_name
                    );
                }
            }
            Ok(())
        }
    }
}

fn mutate(args: MutationArgs, force_update: bool) -> CliResult<()> {
    let entries = parse_json_entries(&args.json_data)?;

    let mut request = if force_update {
        MutationRequest::update(entries)
    } else {
        MutationRequest::add(entries)
    };
    if let Some(path) = &args.key_path {
        validate_key_path(path)?;
        request = request.at_path(path.as_str());
    }

    let config = PartitionConfig {
        max_chunk_bytes: args.max_chunk_bytes,
        ..PartitionConfig::default()
    };

    let store = LocalStore::open(&args.store_dir)?;
    let engine = Engine::new(&store, config);
    let outcome = engine.run_mutation(&args.secret_name, &request, &provenance_tags(&args.env))?;

    let operation = if force_update { "Update" } else { "Add" };
    println!(
        "{} operation completed successfully. Total keys: {}, total parts: {}",
        operation, outcome.key_count, outcome.part_count
    );
    Ok(())
}

/// Parse `--json-data` into root-level entries. Must be a non-empty JSON
/// object; values may be any JSON.
fn parse_json_entries(raw: &str) -> CliResult<BTreeMap<String, Value>> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::invalid_input(format!("invalid JSON data: {}", e)))?;

    let object = match parsed {
        Value::Object(object) => object,
        _ => return Err(CliError::invalid_input("JSON data must be an object")),
    };
    if object.is_empty() {
        return Err(CliError::invalid_input("JSON data is empty"));
    }

    Ok(object.into_iter().collect())
}

fn validate_key_path(path: &str) -> CliResult<()> {
    if path.is_empty() || path.split('.').any(|segment| segment.is_empty()) {
        return Err(CliError::invalid_input(format!(
            "key path '{}' must be non-empty dot-separated segments",
            path
        )));
    }
    Ok(())
}

/// Provenance tags recorded on every newly created part record.
fn provenance_tags(env: &str) -> Tags {
    let mut tags = Tags::new();
    tags.insert("data-classification".to_string(), "undefined".to_string());
    tags.insert("compliance".to_string(), "undefined".to_string());
    tags.insert("env".to_string(), env.to_string());
    tags.insert("resource".to_string(), "secret_store_record".to_string());
    tags.insert(
        "feature".to_string(),
        "multipart_secret_management".to_string(),
    );
    tags
}

/// Log a fatal error to stderr before the process exits non-zero.
pub fn report_failure(error: &CliError) {
    let reason = error.to_string();
    Logger::log_stderr(Severity::Error, "command_failed", &[("reason", reason.as_str())]);
}
