//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dialogue to external systems:
//! - `geocoding` - Reverse geocoding (Nominatim, fixed answers for tests)
//! - `http` - Webhook endpoint for platform updates
//! - `memory` - In-memory repositories, resolver and notifier
//! - `postgres` - Relational store repositories and the settings resolver
//! - `storage` - Dialogue state stores (Redis, PostgreSQL, in-memory)
//! - `telegram` - Bot API client, notifier and wire types

pub mod geocoding;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod telegram;
