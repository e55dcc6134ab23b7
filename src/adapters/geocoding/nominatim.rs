//! Nominatim reverse geocoder.
//!
//! Calls `GET /reverse?format=jsonv2&lat=..&lon=..` and returns the
//! `display_name`. The public instance requires an identifying User-Agent.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::GeocoderConfig;
use crate::domain::customer::Coordinates;
use crate::ports::{GeocodingError, ReverseGeocoder};

/// Nominatim-backed reverse geocoder.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    accept_language: Option<String>,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

impl NominatimGeocoder {
    /// Build a geocoder from configuration.
    ///
    /// # Errors
    /// Returns `GeocodingError::Request` if the HTTP client cannot be built.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| GeocodingError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language.clone(),
            timeout: config.timeout(),
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }

    async fn fetch(&self, coordinates: &Coordinates) -> Result<String, GeocodingError> {
        let mut query = vec![
            ("format", "jsonv2".to_string()),
            ("lat", coordinates.latitude().to_string()),
            ("lon", coordinates.longitude().to_string()),
        ];
        if let Some(language) = &self.accept_language {
            query.push(("accept-language", language.clone()));
        }

        let response = self
            .client
            .get(self.reverse_url())
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout(self.timeout)
                } else {
                    GeocodingError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Request(format!("HTTP {}", status)));
        }

        let body: ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        display_name(body)
    }
}

fn display_name(body: ReverseResponse) -> Result<String, GeocodingError> {
    if let Some(error) = body.error {
        tracing::debug!(error = %error, "Geocoder reported no match");
        return Err(GeocodingError::NotFound);
    }
    match body.display_name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(GeocodingError::NotFound),
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coordinates: &Coordinates) -> Result<String, GeocodingError> {
        // The client timeout covers the body; this bounds connection setup too.
        tokio::time::timeout(self.timeout, self.fetch(coordinates))
            .await
            .map_err(|_| GeocodingError::Timeout(self.timeout))?
    }
}
