//! Customer entity and its enumerated preferences.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ChatId, CustomerId, ExternalUserId, Timestamp, ValidationError};

/// Interface language a customer can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    Uz,
    Qp,
}

impl Language {
    /// All supported languages, in the order their buttons are offered.
    pub const ALL: [Language; 3] = [Language::Ru, Language::Uz, Language::Qp];

    /// Lowercase locale code as stored and passed to the web menu.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uz => "uz",
            Language::Qp => "qp",
        }
    }

    /// Uppercase suffix used when building text keys.
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Language::Ru => "RU",
            Language::Uz => "UZ",
            Language::Qp => "QP",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "uz" => Ok(Language::Uz),
            "qp" => Ok(Language::Qp),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("unsupported code '{}'", other),
            )),
        }
    }
}

/// How the customer wants to receive the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    #[default]
    Delivery,
    Pickup,
}

impl DeliveryMode {
    /// Stored as the `for_pickup` flag.
    pub fn is_pickup(&self) -> bool {
        matches!(self, DeliveryMode::Pickup)
    }

    pub fn from_pickup_flag(for_pickup: bool) -> Self {
        if for_pickup {
            DeliveryMode::Pickup
        } else {
            DeliveryMode::Delivery
        }
    }
}

/// A person ordering through the chat.
///
/// Created lazily on first contact; profile fields fill in as the dialogue
/// progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub external_user_id: ExternalUserId,
    pub chat_id: ChatId,
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub language: Option<Language>,
    pub cashback: Decimal,
    pub delivery_mode: DeliveryMode,
    pub created_at: Timestamp,
}

impl Customer {
    /// A fresh record for a user seen for the first time.
    pub fn new(external_user_id: ExternalUserId, chat_id: ChatId) -> Self {
        Self {
            id: CustomerId::new(),
            external_user_id,
            chat_id,
            phone_number: None,
            name: None,
            language: None,
            cashback: Decimal::ZERO,
            delivery_mode: DeliveryMode::default(),
            created_at: Timestamp::now(),
        }
    }

    pub fn has_phone(&self) -> bool {
        self.phone_number
            .as_deref()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }

    /// Language and phone are both captured.
    pub fn is_profile_complete(&self) -> bool {
        self.language.is_some() && self.has_phone()
    }
}

/// Result of recording a shared phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneCapture {
    /// The customer had no phone before this write.
    pub first_capture: bool,
}
