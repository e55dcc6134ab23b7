//! Storage Adapters
//!
//! Implementations of the DialogueStateStore port.
//!
//! ## Available Adapters
//!
//! - **RedisDialogueStore** - One JSON document per user (production default)
//! - **PostgresDialogueStore** - One row per user in `dialogue_states`
//! - **InMemoryDialogueStore** - Process-local map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryDialogueStore, RedisDialogueStore};
//!
//! // Production
//! let store = RedisDialogueStore::connect("redis://localhost", "menu_bot", timeout).await?;
//!
//! // Testing
//! let store = InMemoryDialogueStore::new();
//! ```

mod in_memory_dialogue_store;
mod postgres_dialogue_store;
mod redis_dialogue_store;

pub use in_memory_dialogue_store::InMemoryDialogueStore;
pub use postgres_dialogue_store::PostgresDialogueStore;
pub use redis_dialogue_store::{dialogue_key, RedisDialogueStore};
