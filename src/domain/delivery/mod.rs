//! Delivery module - where the kitchen delivers and how locations are named.
//!
//! - `geofence` - point-in-polygon tests against active delivery zones
//! - `address_format` - turning geocoder output into a display address

mod address_format;
mod geofence;

pub use address_format::{normalize_address, DROPPED_ADMINISTRATIVE_COMPONENTS};
pub use geofence::{contains, DeliveryZone, GeoPoint, Geofence, Polygon, EDGE_EPSILON};
