//! Saved delivery addresses and their coordinates.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AddressId, CustomerId, Timestamp, ValidationError};

/// Fractional digits kept for stored coordinates.
pub const COORDINATE_SCALE: u32 = 8;

/// A latitude/longitude pair at fixed precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: Decimal,
    longitude: Decimal,
}

impl Coordinates {
    /// Quantizes raw platform coordinates to 8 fractional digits.
    ///
    /// Rounds half to even.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let latitude = quantize("latitude", latitude, 90.0)?;
        let longitude = quantize("longitude", longitude, 180.0)?;
        Ok(Self { latitude, longitude })
    }

    /// Wraps already-stored decimal coordinates.
    pub fn from_decimals(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude: latitude.round_dp(COORDINATE_SCALE),
            longitude: longitude.round_dp(COORDINATE_SCALE),
        }
    }

    pub fn latitude(&self) -> Decimal {
        self.latitude
    }

    pub fn longitude(&self) -> Decimal {
        self.longitude
    }

    /// `(lon, lat)` as floats, the axis order zone polygons use.
    pub fn lon_lat(&self) -> (f64, f64) {
        (
            self.longitude.to_f64().unwrap_or_default(),
            self.latitude.to_f64().unwrap_or_default(),
        )
    }
}

fn quantize(field: &str, degrees: f64, bound: f64) -> Result<Decimal, ValidationError> {
    if !degrees.is_finite() || degrees.abs() > bound {
        return Err(ValidationError::invalid_format(
            field,
            format!("{} is outside ±{}", degrees, bound),
        ));
    }
    Decimal::from_f64(degrees)
        .map(|d| d.round_dp(COORDINATE_SCALE))
        .ok_or_else(|| ValidationError::invalid_format(field, "not representable as decimal"))
}

/// An address row belonging to one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub customer_id: CustomerId,
    pub coordinates: Coordinates,
    /// Normalized display value; doubles as the button label.
    pub value: String,
    pub is_current: bool,
    pub created_at: Timestamp,
}

/// Input for saving a freshly resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub coordinates: Coordinates,
    pub value: String,
}

impl NewAddress {
    pub fn new(coordinates: Coordinates, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("value"));
        }
        Ok(Self { coordinates, value })
    }
}
