//! Notifier Port - push a message to a chat outside the reply flow.
//!
//! Delivery guarantees are the notifier's concern. Callers submit and move on.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;

/// Errors from submitting a notification
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Notification rejected: {0}")]
    Rejected(String),

    #[error("Notifier unavailable: {0}")]
    Unavailable(String),
}

/// Port for outbound notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Submit `text` for delivery to `chat_id`.
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), NotifierError>;
}
