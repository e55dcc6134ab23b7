//! Chat bot configuration (Telegram Bot API)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::error::ValidationError;

/// Where dialogue state is kept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    #[default]
    Redis,
    Postgres,
}

/// Bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot API token
    pub token: SecretString,

    /// Public HTTPS base URL the platform should post updates to.
    /// Webhook registration is skipped when unset.
    pub webhook_url: Option<String>,

    /// Route the webhook is served on
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Shared secret echoed back in `X-Telegram-Bot-Api-Secret-Token`
    pub webhook_secret: Option<SecretString>,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// How often the text/settings snapshot is reloaded, in seconds
    #[serde(default = "default_settings_refresh")]
    pub settings_refresh_secs: u64,

    /// Dialogue state backend
    #[serde(default)]
    pub state_backend: StateBackend,
}

impl BotConfig {
    /// Get settings refresh interval as Duration
    pub fn settings_refresh(&self) -> Duration {
        Duration::from_secs(self.settings_refresh_secs)
    }

    /// Full URL to register with `setWebhook`, if a public URL is set.
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), self.webhook_path))
    }

    /// Validate bot configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOT_TOKEN"));
        }
        if !self.webhook_path.starts_with('/') {
            return Err(ValidationError::InvalidWebhookPath);
        }
        Url::parse(&self.api_base_url).map_err(|e| ValidationError::InvalidUrl {
            field: "bot.api_base_url",
            reason: e.to_string(),
        })?;
        if let Some(webhook_url) = &self.webhook_url {
            let url = Url::parse(webhook_url).map_err(|e| ValidationError::InvalidUrl {
                field: "bot.webhook_url",
                reason: e.to_string(),
            })?;
            if production && url.scheme() != "https" {
                return Err(ValidationError::WebhookMustBeHttps);
            }
        }
        if let Some(secret) = &self.webhook_secret {
            if !is_valid_webhook_secret(secret.expose_secret()) {
                return Err(ValidationError::InvalidWebhookSecret);
            }
        }
        if self.settings_refresh_secs == 0 {
            return Err(ValidationError::InvalidRefreshInterval);
        }
        Ok(())
    }
}

/// The Bot API accepts 1-256 characters from `A-Za-z0-9_-`.
fn is_valid_webhook_secret(secret: &str) -> bool {
    (1..=256).contains(&secret.len())
        && secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn default_webhook_path() -> String {
    "/telegram/webhook".to_string()
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_settings_refresh() -> u64 {
    60
}
