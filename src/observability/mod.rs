//! # Observability
//!
//! Structured JSON logging for operation outcomes.

pub mod logger;

pub use logger::{Logger, Severity};
