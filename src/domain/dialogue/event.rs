//! Inbound events, abstracted from any particular chat platform.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, ExternalUserId};

/// Something a user did in the chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundEvent {
    /// The start command; resets the conversation.
    Start {
        user_id: ExternalUserId,
        chat_id: ChatId,
    },

    /// Free text or a reply-keyboard button press.
    Text { user_id: ExternalUserId, text: String },

    /// A contact card was shared.
    ContactShared {
        user_id: ExternalUserId,
        /// Owner of the shared contact, if the platform knows it.
        contact_user_id: Option<ExternalUserId>,
        phone_number: String,
        first_name: Option<String>,
    },

    /// A map location was shared.
    LocationShared {
        user_id: ExternalUserId,
        latitude: f64,
        longitude: f64,
    },
}

impl InboundEvent {
    /// The user who sent the event.
    pub fn user_id(&self) -> ExternalUserId {
        match self {
            InboundEvent::Start { user_id, .. }
            | InboundEvent::Text { user_id, .. }
            | InboundEvent::ContactShared { user_id, .. }
            | InboundEvent::LocationShared { user_id, .. } => *user_id,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Start { .. } => "start",
            InboundEvent::Text { .. } => "text",
            InboundEvent::ContactShared { .. } => "contact_shared",
            InboundEvent::LocationShared { .. } => "location_shared",
        }
    }

    /// True when the contact belongs to the sender.
    pub fn is_own_contact(&self) -> bool {
        match self {
            InboundEvent::ContactShared {
                user_id,
                contact_user_id,
                ..
            } => contact_user_id.as_ref() == Some(user_id),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_is_extracted_from_every_variant() {
        let user = ExternalUserId::new(11);
        let events = [
            InboundEvent::Start { user_id: user, chat_id: ChatId::new(11) },
            InboundEvent::Text { user_id: user, text: "hi".into() },
            InboundEvent::ContactShared {
                user_id: user,
                contact_user_id: None,
                phone_number: "+1".into(),
                first_name: None,
            },
            InboundEvent::LocationShared { user_id: user, latitude: 0.0, longitude: 0.0 },
        ];
        for event in events {
            assert_eq!(event.user_id(), user);
        }
    }

    #[test]
    fn own_contact_requires_matching_owner() {
        let own = InboundEvent::ContactShared {
            user_id: ExternalUserId::new(1),
            contact_user_id: Some(ExternalUserId::new(1)),
            phone_number: "+998".into(),
            first_name: None,
        };
        let foreign = InboundEvent::ContactShared {
            user_id: ExternalUserId::new(1),
            contact_user_id: Some(ExternalUserId::new(2)),
            phone_number: "+998".into(),
            first_name: None,
        };
        let unknown = InboundEvent::ContactShared {
            user_id: ExternalUserId::new(1),
            contact_user_id: None,
            phone_number: "+998".into(),
            first_name: None,
        };
        assert!(own.is_own_contact());
        assert!(!foreign.is_own_contact());
        assert!(!unknown.is_own_contact());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let event = InboundEvent::Text { user_id: ExternalUserId::new(5), text: "Menu".into() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(event.kind(), "text");
    }
}
