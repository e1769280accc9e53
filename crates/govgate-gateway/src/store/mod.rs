//! Policy store: `(service, intent)` -> optional policy document.
//!
//! The engine only depends on the `PolicyStore` trait. `MemoryStore` keeps
//! raw JSON items and decodes them on every read, so a malformed item
//! surfaces as an error at lookup time rather than at insert time.

pub mod defaults;
pub mod loader;
pub mod memory;

use govgate_core::{PolicyDocument, Result};

pub use loader::{load_policies_file, seed};
pub use memory::MemoryStore;

/// Synchronous policy lookup.
///
/// A missing document is `Ok(None)`, never an error. Errors mean the store
/// itself failed (transport fault, undecodable item).
pub trait PolicyStore: Send + Sync {
    fn get(&self, service: &str, intent: &str) -> Result<Option<PolicyDocument>>;
}
