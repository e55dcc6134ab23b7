//! Geocoding adapters - ReverseGeocoder implementations.
//!
//! - `NominatimGeocoder` - OpenStreetMap Nominatim over HTTP
//! - `FixedGeocoder` - Preset answers for tests and offline runs

mod fixed;
mod nominatim;

pub use fixed::FixedGeocoder;
pub use nominatim::NominatimGeocoder;
