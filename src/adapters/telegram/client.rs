//! Bot API HTTP client.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::domain::dialogue::OutboundMessage;
use crate::domain::foundation::ChatId;

use super::types::{reply_markup, ApiResponse, SendMessageRequest, SetWebhookRequest};

/// Errors from Bot API calls.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("Bot API request failed: {0}")]
    Request(String),

    #[error("Bot API request timed out")]
    Timeout,

    #[error("Bot API rejected {method}: {description}")]
    Api {
        method: &'static str,
        description: String,
    },
}

/// Thin client for the Bot API methods the bot uses.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl TelegramClient {
    /// # Errors
    /// Returns `TelegramError::Request` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TelegramError::Request(describe(&e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token.expose_secret(), method)
    }

    async fn call<P: Serialize + Sync>(&self, method: &'static str, payload: &P) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TelegramError::Timeout
                } else {
                    TelegramError::Request(describe(&e))
                }
            })?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| TelegramError::Request(format!("HTTP {}: {}", status, describe(&e))))?;

        if !body.ok {
            return Err(TelegramError::Api {
                method,
                description: body
                    .description
                    .unwrap_or_else(|| format!("error code {:?}", body.error_code)),
            });
        }
        Ok(())
    }

    /// Send a dialogue reply with its reply keyboard.
    pub async fn send_message(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id: chat_id.as_i64(),
            text: &message.text,
            reply_markup: reply_markup(message),
        };
        self.call("sendMessage", &request).await
    }

    /// Send plain text, leaving the user's current keyboard in place.
    pub async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id: chat_id.as_i64(),
            text,
            reply_markup: None,
        };
        self.call("sendMessage", &request).await
    }

    /// Register the webhook endpoint.
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<(), TelegramError> {
        let request = SetWebhookRequest {
            url,
            secret_token,
            allowed_updates: &["message"],
            drop_pending_updates: false,
        };
        self.call("setWebhook", &request).await
    }
}

/// reqwest errors embed the request URL, which carries the token.
fn describe(e: &reqwest::Error) -> String {
    let kind = if e.is_connect() {
        "connection failed"
    } else if e.is_decode() {
        "invalid response body"
    } else if e.is_builder() {
        "invalid request"
    } else {
        "transport error"
    };
    match e.status() {
        Some(status) => format!("{} (HTTP {})", kind, status),
        None => kind.to_string(),
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
