//! Dialogue State Store Port - Interface for persisting per-user dialogue state.
//!
//! The serving process may restart or run as several workers that share no
//! memory, so implementations must be backed by an external durable store.
//! An absent record is not an error: it means the user is at the initial step.

use async_trait::async_trait;

use crate::domain::dialogue::DialogueState;
use crate::domain::foundation::ExternalUserId;

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("State backend unavailable: {0}")]
    Unavailable(String),

    #[error("State store is closed")]
    Closed,
}

/// Port for persisting and loading dialogue state
#[async_trait]
pub trait DialogueStateStore: Send + Sync {
    /// Load the state for a user
    ///
    /// # Returns
    /// `None` when no record exists (fresh or reset user)
    ///
    /// # Errors
    /// Returns `StateStoreError` if the backend cannot be read
    async fn get(&self, user_id: ExternalUserId) -> Result<Option<DialogueState>, StateStoreError>;

    /// Upsert the state for a user
    ///
    /// Step and data are written in one operation; concurrent writers for the
    /// same user resolve as last-writer-wins.
    ///
    /// # Errors
    /// Returns `StateStoreError` if the write fails
    async fn set(&self, user_id: ExternalUserId, state: &DialogueState) -> Result<(), StateStoreError>;

    /// Remove the state for a user
    ///
    /// Clearing an absent record succeeds.
    ///
    /// # Errors
    /// Returns `StateStoreError` if the delete fails
    async fn clear(&self, user_id: ExternalUserId) -> Result<(), StateStoreError>;

    /// Release underlying connections
    ///
    /// Called once at shutdown. Later calls to other methods fail with
    /// `StateStoreError::Closed`.
    async fn close(&self) -> Result<(), StateStoreError>;
}
