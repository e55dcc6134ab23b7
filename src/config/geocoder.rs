//! Reverse geocoder configuration (Nominatim-compatible)

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::error::ValidationError;

/// Geocoder configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    /// Service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with every request (required by the public Nominatim policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Optional `accept-language` for the returned address
    pub accept_language: Option<String>,
}

impl GeocoderConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate geocoder configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        Url::parse(&self.base_url).map_err(|e| ValidationError::InvalidUrl {
            field: "geocoder.base_url",
            reason: e.to_string(),
        })?;
        if self.user_agent.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GEOCODER_USER_AGENT"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            accept_language: None,
        }
    }
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "menu_bot".to_string()
}

fn default_timeout() -> u64 {
    5
}
