//! Policy evaluation engine and rate counting.
//!
//! Wires a policy store, clock, and rate counter around the pure decision
//! logic in `govgate-core`, and folds every failure into a denial.

pub mod engine;
pub mod rate_limit;

pub use engine::PolicyEngine;
pub use rate_limit::FixedWindowCounter;
