use async_trait::async_trait;

/// Durable key-value storage for small JSON documents
///
/// Plays the role browser local storage plays for a web client: string keys,
/// JSON values, no transactions across keys. Implementations are swappable
/// (SQLite on disk in production, in-memory in tests).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or None if it was never written
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, String>;

    /// Write `value` under `key`, replacing any previous value in one write
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), String>;
}
