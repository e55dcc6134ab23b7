//! Dialogue module - vocabulary of the ordering conversation.
//!
//! - `step` - enumerated positions and legal moves
//! - `state` - what gets persisted per user
//! - `event` - inbound user actions
//! - `message` - outbound text and reply controls
//! - `text_key` - keys into the text/config resolver

mod event;
mod message;
mod state;
mod step;
mod text_key;

pub use event::InboundEvent;
pub use message::{Control, ControlAction, ControlRow, OutboundMessage};
pub use state::{DialogueState, ORIGIN_KEY};
pub use step::Step;
pub use text_key::{LocalizedText, TextKey};
