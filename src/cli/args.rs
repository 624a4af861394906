//! CLI argument definitions using clap
//!
//! Commands:
//! - multisecret add --store-dir <dir> --secret-name <base> --json-data <json>
//! - multisecret update --store-dir <dir> --secret-name <base> --json-data <json>
//! - multisecret find --store-dir <dir> --secret-name <base> --key-path <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::partition::DEFAULT_MAX_CHUNK_BYTES;

/// multisecret - multipart secret management for size-limited secret stores
#[derive(Parser, Debug)]
#[command(name = "multisecret")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by the mutating commands.
#[derive(clap::Args, Debug)]
pub struct MutationArgs {
    /// Root directory of the local secret store
    #[arg(long)]
    pub store_dir: PathBuf,

    /// Base name of the secret (never a part name)
    #[arg(long)]
    pub secret_name: String,

    /// JSON object with the key-value pairs to apply
    #[arg(long)]
    pub json_data: String,

    /// Dot-separated path to the nested object receiving the keys
    #[arg(long)]
    pub key_path: Option<String>,

    /// Environment recorded in the provenance tags
    #[arg(long, default_value = "undefined")]
    pub env: String,

    /// Max serialized size of one part record, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_BYTES)]
    pub max_chunk_bytes: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add new keys to a multipart secret (fails if a key already exists)
    Add {
        #[command(flatten)]
        args: MutationArgs,
    },

    /// Overwrite existing keys of a multipart secret (fails if a key is absent)
    Update {
        #[command(flatten)]
        args: MutationArgs,
    },

    /// Report which part holds a given key path
    Find {
        /// Root directory of the local secret store
        #[arg(long)]
        store_dir: PathBuf,

        /// Base name of the secret
        #[arg(long)]
        secret_name: String,

        /// Dot-separated path to look up
        #[arg(long)]
        key_path: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
