//! Dialogue steps and the moves allowed between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Position of a user's conversation in the ordering flow.
///
/// `Initial` is never stored: an absent state record means `Initial`.
/// There is no terminal step; `Main` is the hub every path returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Fresh user, nothing stored yet.
    #[default]
    Initial,

    /// First-time language choice.
    SetInitialLanguage,

    /// Language change from settings.
    SetLanguage,

    /// Waiting for a shared contact.
    SetPhone,

    /// Hub: menu or settings.
    Main,

    /// Pick a saved address or share a location.
    AddressSection,

    /// Delivery or pickup.
    DeliveryType,

    /// Handed off to the web menu.
    WebView,

    /// Edit language or phone.
    Settings,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Initial,
        Step::SetInitialLanguage,
        Step::SetLanguage,
        Step::SetPhone,
        Step::Main,
        Step::AddressSection,
        Step::DeliveryType,
        Step::WebView,
        Step::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Initial => "initial",
            Step::SetInitialLanguage => "set_initial_language",
            Step::SetLanguage => "set_language",
            Step::SetPhone => "set_phone",
            Step::Main => "main",
            Step::AddressSection => "address_section",
            Step::DeliveryType => "delivery_type",
            Step::WebView => "web_view",
            Step::Settings => "settings",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .iter()
            .copied()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("step", format!("unknown step '{}'", s)))
    }
}

impl StateMachine for Step {
    fn valid_transitions(&self) -> Vec<Self> {
        use Step::*;
        match self {
            Initial => vec![SetInitialLanguage, SetPhone, Main],
            SetInitialLanguage => vec![SetPhone],
            SetLanguage => vec![Main],
            SetPhone => vec![Main, Settings],
            Main => vec![AddressSection, Settings],
            AddressSection => vec![DeliveryType, Main],
            DeliveryType => vec![WebView, AddressSection],
            WebView => vec![DeliveryType, Main],
            Settings => vec![SetLanguage, SetPhone, Main],
        }
    }
}
