//! Dialogue handler - the ordering conversation driven by chat events.

mod engine;
mod replies;
mod texts;

pub use engine::{
    DialogueCollaborators, DialogueEngine, DialogueError, DialogueOutcome, DEFAULT_GEOCODE_TIMEOUT,
};
