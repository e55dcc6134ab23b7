//! HTTP DTOs for the webhook endpoint.
//!
//! Inbound updates use the Bot API wire types; this module maps them to
//! dialogue events and defines the small JSON bodies the endpoint returns.

use serde::Serialize;

use crate::adapters::telegram::types::Message;
use crate::adapters::telegram::Update;
use crate::domain::dialogue::InboundEvent;
use crate::domain::foundation::{ChatId, ExternalUserId};

// ════════════════════════════════════════════════════════════════════════════
// Update mapping
// ════════════════════════════════════════════════════════════════════════════

/// Command that resets the conversation.
pub const START_COMMAND: &str = "/start";

/// A dialogue event and the chat its reply goes to.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEvent {
    pub chat_id: ChatId,
    pub event: InboundEvent,
}

/// Maps one update to a dialogue event.
///
/// Returns `None` for updates the dialogue does not consume: non-message
/// updates, messages without a human sender, and messages carrying none of
/// contact, location or text. Contact wins over location, location over text.
pub fn route_update(update: &Update) -> Option<RoutedEvent> {
    let message = update.message.as_ref()?;
    let sender = message.from.as_ref().filter(|user| !user.is_bot)?;

    let user_id = ExternalUserId::new(sender.id);
    let chat_id = ChatId::new(message.chat.id);

    let event = event_for(message, user_id, chat_id)?;
    Some(RoutedEvent { chat_id, event })
}

fn event_for(message: &Message, user_id: ExternalUserId, chat_id: ChatId) -> Option<InboundEvent> {
    if let Some(contact) = &message.contact {
        return Some(InboundEvent::ContactShared {
            user_id,
            contact_user_id: contact.user_id.map(ExternalUserId::new),
            phone_number: contact.phone_number.clone(),
            first_name: contact.first_name.clone(),
        });
    }

    if let Some(location) = &message.location {
        return Some(InboundEvent::LocationShared {
            user_id,
            latitude: location.latitude,
            longitude: location.longitude,
        });
    }

    let text = message.text.as_deref()?;
    if is_start_command(text) {
        return Some(InboundEvent::Start { user_id, chat_id });
    }
    Some(InboundEvent::Text {
        user_id,
        text: text.to_string(),
    })
}

/// `/start`, optionally with a deep-link payload or bot mention.
fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    command == START_COMMAND || command.starts_with("/start@")
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body for rejected or failed deliveries.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
