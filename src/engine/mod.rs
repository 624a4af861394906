//! # Engine
//!
//! The top-level read-modify-write orchestration over a secret store.

pub mod engine;
pub mod errors;

pub use engine::{Engine, FindMatch, MutationOutcome};
pub use errors::{EngineError, EngineResult};
