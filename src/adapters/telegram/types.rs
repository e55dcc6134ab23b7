//! Bot API wire types.
//!
//! Only the fields the dialogue reads or writes are modelled; unknown fields
//! are ignored on input and optional fields are omitted on output.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{ControlAction, OutboundMessage};

// ----- Inbound -----

/// One webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    pub contact: Option<Contact>,
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

// ----- Outbound -----

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
    pub allowed_updates: &'a [&'a str],
    pub drop_pending_updates: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_contact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebAppInfo {
    pub url: String,
}

/// Generic Bot API response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

/// Reply keyboard for a message.
///
/// `None` when the message has no controls, which leaves the keyboard the
/// user already sees in place.
pub fn reply_markup(message: &OutboundMessage) -> Option<ReplyKeyboardMarkup> {
    if message.controls.iter().all(Vec::is_empty) {
        return None;
    }

    let keyboard = message
        .controls
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|control| {
                    let mut button = KeyboardButton {
                        text: control.label.clone(),
                        request_contact: None,
                        request_location: None,
                        web_app: None,
                    };
                    match &control.action {
                        ControlAction::Reply => {}
                        ControlAction::RequestContact => button.request_contact = Some(true),
                        ControlAction::RequestLocation => button.request_location = Some(true),
                        ControlAction::OpenUrl(url) => {
                            button.web_app = Some(WebAppInfo {
                                url: url.to_string(),
                            })
                        }
                    }
                    button
                })
                .collect()
        })
        .collect();

    Some(ReplyKeyboardMarkup {
        keyboard,
        resize_keyboard: true,
    })
}
