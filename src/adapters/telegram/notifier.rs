//! Notifier and reply sender backed by the Bot API.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::dialogue::OutboundMessage;
use crate::domain::foundation::ChatId;
use crate::ports::{Notifier, NotifierError, ReplySender};

use super::client::{TelegramClient, TelegramError};

/// Sends notifications as plain chat messages.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Arc<TelegramClient>,
}

impl TelegramNotifier {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), NotifierError> {
        self.client.send_text(chat_id, text).await.map_err(to_notifier_error)
    }
}

#[async_trait]
impl ReplySender for TelegramNotifier {
    async fn send_reply(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), NotifierError> {
        self.client
            .send_message(chat_id, message)
            .await
            .map_err(to_notifier_error)
    }
}

fn to_notifier_error(err: TelegramError) -> NotifierError {
    match err {
        TelegramError::Api { description, .. } => NotifierError::Rejected(description),
        other => NotifierError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_rejections() {
        let err = to_notifier_error(TelegramError::Api {
            method: "sendMessage",
            description: "Forbidden: bot was blocked by the user".to_string(),
        });
        assert!(matches!(err, NotifierError::Rejected(d) if d.contains("blocked")));
    }

    #[test]
    fn transport_errors_are_unavailability() {
        let err = to_notifier_error(TelegramError::Timeout);
        assert!(matches!(err, NotifierError::Unavailable(_)));
    }
}
