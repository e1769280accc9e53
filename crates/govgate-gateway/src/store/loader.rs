//! Policy file loading (startup path).
//!
//! A policy file is a JSON array of documents. Every entry is structurally
//! validated; one bad entry fails the whole load so a typo never ships as a
//! silently missing policy.

use std::fs;

use serde_json::Value as Json;

use govgate_core::error::{GovError, Result};
use govgate_core::policy::validate::{lint, validate};
use govgate_core::PolicyDocument;

use super::MemoryStore;

pub fn load_policies_file(path: &str) -> Result<Vec<PolicyDocument>> {
    let s = fs::read_to_string(path)
        .map_err(|e| GovError::Internal(format!("read policies failed ({path}): {e}")))?;
    parse_policies(&s)
}

pub fn parse_policies(s: &str) -> Result<Vec<PolicyDocument>> {
    let raw: Json = serde_json::from_str(s)
        .map_err(|e| GovError::InvalidPolicy(format!("invalid json: {e}")))?;
    let items = raw
        .as_array()
        .ok_or_else(|| GovError::InvalidPolicy("policy file must be a JSON array".into()))?;

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let doc = validate(item).map_err(|e| match e {
            GovError::InvalidPolicy(msg) => GovError::InvalidPolicy(format!("policies[{i}]: {msg}")),
            other => other,
        })?;
        for finding in lint(&doc) {
            tracing::warn!(policy = %doc.key(), %finding, "policy lint");
        }
        out.push(doc);
    }
    Ok(out)
}

/// Write documents into the store. Returns the number written.
pub fn seed(store: &MemoryStore, docs: &[PolicyDocument]) -> Result<usize> {
    for doc in docs {
        let replaced = store.put(doc)?;
        tracing::info!(policy = %doc.key(), replaced, "policy loaded");
    }
    Ok(docs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::defaults::default_policies;
    use crate::store::PolicyStore;

    #[test]
    fn parses_and_seeds() {
        let docs = parse_policies(
            r#"[
                {"service": "orbit", "intent": "call_metrics", "enabled": true},
                {"service": "axon", "intent": "reason", "enabled": false,
                 "time_restrictions": {"allowed_hours": [0, 1]}}
            ]"#,
        )
        .unwrap();
        let store = MemoryStore::new();
        assert_eq!(seed(&store, &docs).unwrap(), 2);
        assert_eq!(store.keys(), vec!["axon:reason", "orbit:call_metrics"]);
    }

    #[test]
    fn one_bad_entry_fails_the_load() {
        let err = parse_policies(r#"[{"service": "orbit", "intent": "x"}]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid policy: policies[0]: Missing required field: enabled"
        );
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_policies(r#"{"service": "orbit"}"#).is_err());
    }

    #[test]
    fn defaults_round_trip_through_store() {
        let store = MemoryStore::new();
        seed(&store, &default_policies()).unwrap();
        let doc = store.get("orbit", "call_reasoning").unwrap().unwrap();
        assert_eq!(doc.time_restrictions.unwrap().allowed_hours.len(), 24);
        assert_eq!(doc.conditions.len(), 1);
    }
}
