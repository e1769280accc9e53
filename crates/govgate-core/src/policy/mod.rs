//! Policy data model (documents, conditions, dynamic values).
//!
//! Documents arrive as schemaless JSON from the store or a policy file;
//! this module gives them a typed shape without losing unknown names.

pub mod document;
pub mod validate;
pub mod value;

pub use document::{
    policy_key, Condition, ConditionKind, Operator, PolicyDocument, RateLimits, TimeRestrictions,
};
pub use value::{Context, Value};
