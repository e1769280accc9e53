//! govgate core: policy model, condition/policy evaluation, error types.
//!
//! This crate holds everything needed to turn a policy document and a request
//! context into an allow/deny decision. It carries no transport, storage, or
//! runtime dependencies so the same rules can run behind any gateway.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Comparisons degrade to `false` instead of failing, and fallible paths
//! surface as `GovError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod eval;
pub mod policy;
pub mod rate;

/// Shared result type.
pub use error::{GovError, Result};
pub use eval::{Decision, Outcome};
pub use policy::{Context, PolicyDocument, Value};
