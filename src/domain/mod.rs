//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `customer` - Customers, their preferences and saved addresses
//! - `delivery` - Geofencing and address normalization
//! - `dialogue` - Steps, persisted state, inbound events and outbound messages

pub mod customer;
pub mod delivery;
pub mod dialogue;
pub mod foundation;
