use dashmap::DashMap;
use serde::Deserialize;
use serde_json::Value as Json;

use govgate_core::error::{GovError, Result};
use govgate_core::policy::policy_key;
use govgate_core::PolicyDocument;

use super::PolicyStore;

/// In-process store keyed by `service:intent`.
///
/// Later writes for the same key replace earlier ones.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<String, Json>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { items: DashMap::new() }
    }

    /// Insert a typed document. Returns true if it replaced an existing one.
    pub fn put(&self, doc: &PolicyDocument) -> Result<bool> {
        let item = serde_json::to_value(doc)
            .map_err(|e| GovError::Internal(format!("encode policy {}: {e}", doc.key())))?;
        Ok(self.items.insert(doc.key(), item).is_some())
    }

    /// Insert a raw item without validation.
    pub fn put_raw(&self, service: &str, intent: &str, item: Json) -> bool {
        self.items.insert(policy_key(service, intent), item).is_some()
    }

    pub fn remove(&self, service: &str, intent: &str) -> bool {
        self.items.remove(&policy_key(service, intent)).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sorted `service:intent` keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl PolicyStore for MemoryStore {
    fn get(&self, service: &str, intent: &str) -> Result<Option<PolicyDocument>> {
        let key = policy_key(service, intent);
        let Some(item) = self.items.get(&key) else {
            return Ok(None);
        };
        let doc = PolicyDocument::deserialize(item.value())
            .map_err(|e| GovError::MalformedPolicy { key, msg: e.to_string() })?;
        Ok(Some(doc))
    }
}
