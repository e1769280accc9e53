//! Structural validation for policy documents on the load path.
//!
//! `validate` rejects documents the engine cannot read. `lint` reports
//! documents it can read but that probably do not mean what their author
//! wanted (for example, an unrecognized condition type, which passes).

use serde_json::Value as Json;

use crate::error::{GovError, Result};

use super::document::{ConditionKind, Operator, PolicyDocument};

const REQUIRED_FIELDS: [&str; 3] = ["service", "intent", "enabled"];

/// Check required fields and shape, then decode.
pub fn validate(raw: &Json) -> Result<PolicyDocument> {
    let obj = raw
        .as_object()
        .ok_or_else(|| GovError::InvalidPolicy("policy must be a JSON object".into()))?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(GovError::InvalidPolicy(format!("Missing required field: {field}")));
        }
    }

    if !obj.get("enabled").is_some_and(Json::is_boolean) {
        return Err(GovError::InvalidPolicy("Field 'enabled' must be boolean".into()));
    }

    for field in ["service", "intent"] {
        match obj.get(field).and_then(Json::as_str) {
            Some(s) if !s.is_empty() => {}
            _ => {
                return Err(GovError::InvalidPolicy(format!(
                    "Field '{field}' must be a non-empty string"
                )))
            }
        }
    }

    let doc: PolicyDocument = serde_json::from_value(raw.clone())
        .map_err(|e| GovError::InvalidPolicy(format!("{e}")))?;

    if let Some(tr) = &doc.time_restrictions {
        if let Some(h) = tr.allowed_hours.iter().find(|h| **h > 23) {
            return Err(GovError::InvalidPolicy(format!(
                "allowed_hours entry out of range 0..23: {h}"
            )));
        }
    }

    Ok(doc)
}

/// Advisory findings for a decoded document.
pub fn lint(doc: &PolicyDocument) -> Vec<String> {
    let mut out = Vec::new();
    for (i, c) in doc.conditions.iter().enumerate() {
        match &c.kind {
            Some(ConditionKind::ContextCheck) => {}
            Some(ConditionKind::Other(t)) => out.push(format!(
                "conditions[{i}]: unknown type '{t}' is treated as satisfied"
            )),
            None => out.push(format!(
                "conditions[{i}]: missing type is treated as satisfied"
            )),
        }
        match &c.operator {
            Some(Operator::Unsupported(op)) => out.push(format!(
                "conditions[{i}]: unsupported operator '{op}' never matches"
            )),
            None => out.push(format!("conditions[{i}]: missing operator never matches")),
            Some(_) => {}
        }
        if c.field.is_none() && c.kind == Some(ConditionKind::ContextCheck) {
            out.push(format!("conditions[{i}]: missing field reads as null"));
        }
    }
    if let Some(rl) = &doc.rate_limits {
        if rl.requests_per_minute.is_none() && rl.requests_per_hour.is_none() {
            out.push("rate_limits declares no window".into());
        }
    }
    out
}
