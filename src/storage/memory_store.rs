use async_trait::async_trait;
use dashmap::DashMap;

use super::store::KeyValueStore;

/// Process-local store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, serde_json::Value>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, String> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), String> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
