// Adapters layer: concrete implementations for external systems (generation API, storage).

pub mod anthropic;
pub mod memory_store;
pub mod sqlite_store;

pub use anthropic::{AnthropicClient, OfflineGenerator};
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
