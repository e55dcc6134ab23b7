//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue engine and the outside world. Adapters implement these ports.
//!
//! ## State
//!
//! - `DialogueStateStore` - Durable per-user step and context
//!
//! ## Relational Store
//!
//! - `CustomerRepository` - Customer profile fields
//! - `AddressRepository` - Saved addresses and the current-address flag
//! - `DeliveryZoneReader` - Active delivery zone polygons
//!
//! ## External Services
//!
//! - `TextResolver` - Localized text and config values
//! - `ReverseGeocoder` - Coordinates to address text
//! - `Notifier` - Fire-and-forget outbound messages
//! - `ReplySender` - Replies with their keyboard controls

mod address_repository;
mod customer_repository;
mod delivery_zone_reader;
mod dialogue_state_store;
mod notifier;
mod reply_sender;
mod reverse_geocoder;
mod text_resolver;

pub use address_repository::AddressRepository;
pub use customer_repository::{CustomerRegistration, CustomerRepository};
pub use delivery_zone_reader::DeliveryZoneReader;
pub use dialogue_state_store::{DialogueStateStore, StateStoreError};
pub use notifier::{Notifier, NotifierError};
pub use reply_sender::ReplySender;
pub use reverse_geocoder::{GeocodingError, ReverseGeocoder};
pub use text_resolver::{value_as_flag, value_as_text, TextResolver};
