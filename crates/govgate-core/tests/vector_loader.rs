//! JSON test vector loader shared by condition/policy tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

use govgate_core::policy::{Context, Operator, PolicyDocument, Value};

/// One policy evaluation scenario.
#[derive(Debug, Deserialize)]
pub struct PolicyVector {
    pub description: String,
    pub policy: PolicyDocument,
    #[serde(default)]
    pub context: Context,
    pub hour: u32,
    pub expect: ExpectDecision,
}

#[derive(Debug, Deserialize)]
pub struct ExpectDecision {
    pub allowed: bool,
    pub reason: String,
}

/// One comparison case. A missing `actual` models an absent context field.
#[derive(Debug, Deserialize)]
pub struct ConditionVector {
    pub description: String,
    #[serde(default)]
    pub actual: Option<Value>,
    pub operator: Operator,
    pub expected: Value,
    pub result: bool,
}

pub fn read(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

pub fn load_policy(name: &str) -> PolicyVector {
    serde_json::from_str(&read(name)).unwrap_or_else(|e| panic!("vector {name}: {e}"))
}

pub fn load_conditions(name: &str) -> Vec<ConditionVector> {
    serde_json::from_str(&read(name)).unwrap_or_else(|e| panic!("vector {name}: {e}"))
}
