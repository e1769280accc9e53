//! Transport layer (HTTP).
//!
//! Parses the evaluate request once, hands `(service, intent, context)` to
//! the engine, and maps the decision to a status + envelope.

pub mod envelope;
pub mod http;
