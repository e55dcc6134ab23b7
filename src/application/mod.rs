//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{DialogueCollaborators, DialogueEngine, DialogueError, DialogueOutcome};
