//! In-memory adapters for tests and local development.
//!
//! None of these are durable; they implement the relational and outbound
//! ports so the dialogue engine can run without external services.

mod address_repository;
mod customer_repository;
mod delivery_zone_reader;
mod notifier;
mod text_resolver;

pub use address_repository::InMemoryAddressRepository;
pub use customer_repository::InMemoryCustomerRepository;
pub use delivery_zone_reader::InMemoryDeliveryZoneReader;
pub use notifier::RecordingNotifier;
pub use text_resolver::StaticTextResolver;
