//! Policy document wire model.
//!
//! A document is the full rule set for one `(service, intent)` pair. Every
//! field except the identity is optional on the wire; defaults mirror what a
//! hand-written policy file omits.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Rule set for one `(service, intent)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub service: String,
    pub intent: String,
    /// Master switch. Absent means enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_restrictions: Option<TimeRestrictions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limits: Option<RateLimits>,
    /// Evaluated in order; the first failing condition decides.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl PolicyDocument {
    /// Minimal enabled document with no restrictions.
    pub fn new(service: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            intent: intent.into(),
            enabled: true,
            time_restrictions: None,
            rate_limits: None,
            conditions: Vec::new(),
            description: None,
        }
    }

    /// Store key, `service:intent`.
    pub fn key(&self) -> String {
        policy_key(&self.service, &self.intent)
    }
}

/// Canonical `service:intent` key used by stores, counters and logs.
pub fn policy_key(service: &str, intent: &str) -> String {
    format!("{service}:{intent}")
}

/// UTC hour-of-day window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRestrictions {
    /// Hours 0..=23. Empty means unrestricted.
    #[serde(default)]
    pub allowed_hours: Vec<u32>,
}

/// Declared request quotas. Each window is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_minute: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_hour: Option<u64>,
}

/// One field check against the request context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Missing type is treated like an unknown one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConditionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Condition {
    /// `context_check` condition.
    pub fn context_check(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            kind: Some(ConditionKind::ContextCheck),
            field: Some(field.into()),
            operator: Some(operator),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Condition kind. Unrecognized names are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionKind {
    ContextCheck,
    Other(String),
}

impl From<String> for ConditionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "context_check" => ConditionKind::ContextCheck,
            _ => ConditionKind::Other(s),
        }
    }
}

impl From<ConditionKind> for String {
    fn from(k: ConditionKind) -> Self {
        match k {
            ConditionKind::ContextCheck => "context_check".into(),
            ConditionKind::Other(s) => s,
        }
    }
}

/// Comparison operator. Unrecognized names are kept verbatim and always
/// compare false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    Unsupported(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::Unsupported(s) => s,
        }
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" => Operator::Equals,
            "not_equals" => Operator::NotEquals,
            "contains" => Operator::Contains,
            "greater_than" => Operator::GreaterThan,
            "less_than" => Operator::LessThan,
            _ => Operator::Unsupported(s),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
