//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCustomerRepository` - Customer rows keyed by external user id
//! - `PostgresAddressRepository` - Saved addresses with a single current flag
//! - `PostgresDeliveryZoneReader` - Active delivery zone polygons
//! - `PostgresTextResolver` - Periodically refreshed `bot_settings` snapshot

mod address_repository;
mod customer_repository;
mod delivery_zone_reader;
mod text_resolver;

pub use address_repository::PostgresAddressRepository;
pub use customer_repository::PostgresCustomerRepository;
pub use delivery_zone_reader::PostgresDeliveryZoneReader;
pub use text_resolver::PostgresTextResolver;
