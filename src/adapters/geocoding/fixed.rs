//! Fixed-response geocoder for tests and offline development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::customer::Coordinates;
use crate::ports::{GeocodingError, ReverseGeocoder};

#[derive(Debug, Clone)]
enum Reply {
    Address(String),
    NotFound,
    Unreachable,
}

/// Geocoder that returns a preset answer and records what it was asked.
#[derive(Debug, Clone)]
pub struct FixedGeocoder {
    reply: Reply,
    calls: Arc<Mutex<Vec<Coordinates>>>,
}

impl FixedGeocoder {
    /// Always resolve to `address`.
    pub fn resolving(address: impl Into<String>) -> Self {
        Self::with(Reply::Address(address.into()))
    }

    /// Always report no match.
    pub fn not_found() -> Self {
        Self::with(Reply::NotFound)
    }

    /// Always fail as if the service were down.
    pub fn unreachable() -> Self {
        Self::with(Reply::Unreachable)
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Coordinates passed to `reverse`, in call order.
    pub async fn calls(&self) -> Vec<Coordinates> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ReverseGeocoder for FixedGeocoder {
    async fn reverse(&self, coordinates: &Coordinates) -> Result<String, GeocodingError> {
        self.calls.lock().await.push(*coordinates);
        match &self.reply {
            Reply::Address(address) => Ok(address.clone()),
            Reply::NotFound => Err(GeocodingError::NotFound),
            Reply::Unreachable => Err(GeocodingError::Request("connection refused".to_string())),
        }
    }
}
