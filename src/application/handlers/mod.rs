//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod dialogue;

pub use dialogue::{DialogueCollaborators, DialogueEngine, DialogueError, DialogueOutcome};
