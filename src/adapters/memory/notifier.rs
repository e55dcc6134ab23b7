//! Notifier and reply sender that record instead of delivering.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::dialogue::OutboundMessage;
use crate::domain::foundation::ChatId;
use crate::ports::{Notifier, NotifierError, ReplySender};

/// Keeps every submitted message; optionally rejects them all.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(ChatId, String)>>>,
    replies: Arc<Mutex<Vec<(ChatId, OutboundMessage)>>>,
    reject: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose `send` always fails (after recording the attempt).
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().await.clone()
    }

    pub async fn replies(&self) -> Vec<(ChatId, OutboundMessage)> {
        self.replies.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<(), NotifierError> {
        self.sent.lock().await.push((chat_id, text.to_string()));
        if self.reject {
            return Err(NotifierError::Rejected("rejecting notifier".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReplySender for RecordingNotifier {
    async fn send_reply(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), NotifierError> {
        self.replies.lock().await.push((chat_id, message.clone()));
        if self.reject {
            return Err(NotifierError::Rejected("rejecting notifier".to_string()));
        }
        Ok(())
    }
}
