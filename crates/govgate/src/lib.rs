//! Top-level facade crate for govgate.
//!
//! Re-exports the policy core and the gateway library so users can depend on
//! a single crate.

pub mod core {
    pub use govgate_core::*;
}

pub mod gateway {
    pub use govgate_gateway::*;
}
