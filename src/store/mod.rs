//! # Secret Store Collaborators
//!
//! The `SecretStore` trait is the engine's only view of the outside
//! world; implementations here cover tests (`MemoryStore`) and a simple
//! filesystem deployment (`LocalStore`). A remote-API store lives outside
//! this crate behind the same trait.

pub mod backend;
pub mod errors;
pub mod local;
pub mod memory;

pub use backend::{SecretStore, Tags};
pub use errors::{StoreError, StoreResult};
pub use local::LocalStore;
pub use memory::MemoryStore;
