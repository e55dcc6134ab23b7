//! In-Memory Dialogue Store Adapter
//!
//! Keeps dialogue state in a process-local map. Not durable across restarts;
//! used for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::DialogueState;
use crate::domain::foundation::ExternalUserId;
use crate::ports::{DialogueStateStore, StateStoreError};

/// In-memory storage for dialogue state
#[derive(Debug, Clone, Default)]
pub struct InMemoryDialogueStore {
    states: Arc<RwLock<HashMap<ExternalUserId, DialogueState>>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryDialogueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with stored state
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }

    fn ensure_open(&self) -> Result<(), StateStoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StateStoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl DialogueStateStore for InMemoryDialogueStore {
    async fn get(&self, user_id: ExternalUserId) -> Result<Option<DialogueState>, StateStoreError> {
        self.ensure_open()?;
        Ok(self.states.read().await.get(&user_id).cloned())
    }

    async fn set(&self, user_id: ExternalUserId, state: &DialogueState) -> Result<(), StateStoreError> {
        self.ensure_open()?;
        self.states.write().await.insert(user_id, state.clone());
        Ok(())
    }

    async fn clear(&self, user_id: ExternalUserId) -> Result<(), StateStoreError> {
        self.ensure_open()?;
        self.states.write().await.remove(&user_id);
        Ok(())
    }

    async fn close(&self) -> Result<(), StateStoreError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
