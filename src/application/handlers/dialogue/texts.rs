//! Typed access to the text resolver.

use std::sync::Arc;
use url::Url;

use crate::domain::dialogue::TextKey;
use crate::ports::{value_as_flag, value_as_text, TextResolver};

/// Resolves body texts, button labels and switches.
///
/// Bodies fall back to the key so a missing text is visible rather than
/// silent. Labels have no fallback: an unconfigured button is not offered
/// and never matches input.
#[derive(Clone)]
pub(crate) struct Texts {
    resolver: Arc<dyn TextResolver>,
}

impl Texts {
    pub(crate) fn new(resolver: Arc<dyn TextResolver>) -> Self {
        Self { resolver }
    }

    async fn lookup(&self, key: TextKey) -> Option<String> {
        self.resolver
            .resolve(&key.as_key())
            .await
            .as_ref()
            .and_then(value_as_text)
            .filter(|text| !text.trim().is_empty())
    }

    pub(crate) async fn body(&self, key: TextKey) -> String {
        match self.lookup(key).await {
            Some(text) => text,
            None => {
                tracing::warn!(key = %key, "Text not configured; falling back to key");
                key.as_key()
            }
        }
    }

    pub(crate) async fn label(&self, key: TextKey) -> Option<String> {
        self.lookup(key).await.map(|label| label.trim().to_string())
    }

    /// Optional text with no fallback.
    pub(crate) async fn optional(&self, key: TextKey) -> Option<String> {
        self.lookup(key).await
    }

    pub(crate) async fn flag(&self, key: TextKey) -> bool {
        self.resolver
            .resolve(&key.as_key())
            .await
            .as_ref()
            .and_then(value_as_flag)
            .unwrap_or(false)
    }

    pub(crate) async fn url(&self, key: TextKey) -> Option<Url> {
        let raw = self.lookup(key).await?;
        match Url::parse(raw.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Configured URL is invalid");
                None
            }
        }
    }

    /// True if `input` is the configured label for `key`.
    pub(crate) async fn matches(&self, key: TextKey, input: &str) -> bool {
        self.label(key)
            .await
            .map_or(false, |label| label == input.trim())
    }
}
