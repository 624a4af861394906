//! multisecret - multipart secret management for size-limited secret stores
//!
//! Splits a logical key-value secret document that exceeds the size limit
//! of a single store record across multiple physical parts, and
//! reassembles it on read.

pub mod cli;
pub mod document;
pub mod engine;
pub mod observability;
pub mod partition;
pub mod store;
