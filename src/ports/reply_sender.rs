//! Reply Sender Port - deliver the engine's reply to the chat it answers.

use async_trait::async_trait;

use crate::domain::dialogue::OutboundMessage;
use crate::domain::foundation::ChatId;

use super::NotifierError;

/// Port for rendering and delivering an `OutboundMessage` with its controls
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), NotifierError>;
}
