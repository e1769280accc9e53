//! govgate gateway library entry.
//!
//! This crate wires config, the policy store, the evaluation engine, metrics,
//! and the HTTP transport into a cohesive governance service. It is intended
//! to be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod store;
pub mod transport;
