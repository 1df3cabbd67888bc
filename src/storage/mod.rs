mod store;
mod sqlite_store;
mod memory_store;

pub use store::KeyValueStore;
pub use sqlite_store::SqliteKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
