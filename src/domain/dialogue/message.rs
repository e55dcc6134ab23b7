//! Outbound messages: body text plus rows of reply controls.

use serde::{Deserialize, Serialize};
use url::Url;

/// What pressing a control does besides sending its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "url", rename_all = "snake_case")]
pub enum ControlAction {
    /// Sends the label back as text.
    Reply,
    /// Asks the platform to share the user's contact.
    RequestContact,
    /// Asks the platform to share the user's location.
    RequestLocation,
    /// Opens an external page (the web menu).
    OpenUrl(Url),
}

/// A single labeled button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub label: String,
    pub action: ControlAction,
}

impl Control {
    pub fn reply(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ControlAction::Reply,
        }
    }

    pub fn request_contact(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ControlAction::RequestContact,
        }
    }

    pub fn request_location(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ControlAction::RequestLocation,
        }
    }

    pub fn open_url(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            action: ControlAction::OpenUrl(url),
        }
    }
}

pub type ControlRow = Vec<Control>;

/// A reply to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    /// Empty means "keep whatever keyboard is showing".
    pub controls: Vec<ControlRow>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            controls: Vec::new(),
        }
    }

    pub fn with_controls(text: impl Into<String>, controls: Vec<ControlRow>) -> Self {
        Self {
            text: text.into(),
            controls,
        }
    }

    /// Labels in row order, flattened.
    pub fn labels(&self) -> Vec<&str> {
        self.controls
            .iter()
            .flat_map(|row| row.iter().map(|c| c.label.as_str()))
            .collect()
    }

    pub fn find_control(&self, label: &str) -> Option<&Control> {
        self.controls.iter().flatten().find(|c| c.label == label)
    }
}
