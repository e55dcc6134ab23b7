//! Reverse Geocoder Port - coordinates to a free-text address.
//!
//! Implementations perform network I/O and may fail or time out. Callers
//! treat every error as recoverable: the user is asked to resend.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::customer::Coordinates;

/// Errors from reverse geocoding
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Geocoder timed out after {0:?}")]
    Timeout(Duration),

    #[error("Geocoder request failed: {0}")]
    Request(String),

    #[error("No address found for coordinates")]
    NotFound,

    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),
}

/// Port for reverse geocoding
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve coordinates to the geocoder's display address
    ///
    /// The returned string is comma separated, most specific component first.
    ///
    /// # Errors
    /// Returns `GeocodingError` on network failure, timeout or empty result
    async fn reverse(&self, coordinates: &Coordinates) -> Result<String, GeocodingError>;
}
