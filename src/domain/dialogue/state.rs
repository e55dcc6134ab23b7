//! Persisted per-user dialogue state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Step;

/// Data key recording which step sent the user into `SetPhone`.
pub const ORIGIN_KEY: &str = "origin";

/// Current step plus free-form context carried between steps.
///
/// Step and data are always written together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DialogueState {
    pub step: Step,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl DialogueState {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// The step the user came from, if recorded.
    pub fn origin(&self) -> Option<Step> {
        self.data_str(ORIGIN_KEY).and_then(|s| s.parse().ok())
    }

    /// Records `origin` as the step that led here.
    pub fn entered_from(self, origin: Step) -> Self {
        self.with_data(ORIGIN_KEY, origin.as_str())
    }
}
