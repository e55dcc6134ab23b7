//! Redis-backed dialogue store for multi-worker deployments.
//!
//! Each user's state is one JSON document under
//! `<prefix>:dialogue:<user_id>`, written with a single `SET` so step and
//! data can never be observed out of sync.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::dialogue::DialogueState;
use crate::domain::foundation::ExternalUserId;
use crate::ports::{DialogueStateStore, StateStoreError};

/// Redis dialogue store.
///
/// The multiplexed connection is cloned per command; `close` drops the
/// shared handle so later commands fail with `StateStoreError::Closed`.
pub struct RedisDialogueStore {
    conn: RwLock<Option<MultiplexedConnection>>,
    key_prefix: String,
    timeout: Duration,
}

impl RedisDialogueStore {
    /// Wrap an existing connection.
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>, timeout: Duration) -> Self {
        Self {
            conn: RwLock::new(Some(conn)),
            key_prefix: key_prefix.into(),
            timeout,
        }
    }

    /// Open a connection to `url`.
    ///
    /// # Errors
    /// Returns `StateStoreError::Unavailable` if the URL is invalid or the
    /// server cannot be reached within `timeout`.
    pub async fn connect(
        url: &str,
        key_prefix: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StateStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| StateStoreError::Unavailable(format!("connect timed out after {:?}", timeout)))?
            .map_err(unavailable)?;
        Ok(Self::new(conn, key_prefix, timeout))
    }

    fn key(&self, user_id: ExternalUserId) -> String {
        dialogue_key(&self.key_prefix, user_id)
    }

    async fn connection(&self) -> Result<MultiplexedConnection, StateStoreError> {
        self.conn.read().await.clone().ok_or(StateStoreError::Closed)
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, StateStoreError> {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| StateStoreError::Unavailable(format!("command timed out after {:?}", self.timeout)))?
            .map_err(unavailable)
    }
}

/// Key under which a user's state is stored.
pub fn dialogue_key(prefix: &str, user_id: ExternalUserId) -> String {
    format!("{}:dialogue:{}", prefix, user_id)
}

fn unavailable(e: redis::RedisError) -> StateStoreError {
    StateStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl DialogueStateStore for RedisDialogueStore {
    async fn get(&self, user_id: ExternalUserId) -> Result<Option<DialogueState>, StateStoreError> {
        let mut conn = self.connection().await?;
        let key = self.key(user_id);

        let raw: Option<String> = self.bounded(conn.get(&key)).await?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, user_id: ExternalUserId, state: &DialogueState) -> Result<(), StateStoreError> {
        let json = serde_json::to_string(state)
            .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;
        let mut conn = self.connection().await?;
        let key = self.key(user_id);

        self.bounded(conn.set::<_, _, ()>(&key, json)).await
    }

    async fn clear(&self, user_id: ExternalUserId) -> Result<(), StateStoreError> {
        let mut conn = self.connection().await?;
        let key = self.key(user_id);

        self.bounded(conn.del::<_, ()>(&key)).await
    }

    async fn close(&self) -> Result<(), StateStoreError> {
        self.conn.write().await.take();
        tracing::info!("Redis dialogue store closed");
        Ok(())
    }
}

impl std::fmt::Debug for RedisDialogueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDialogueStore")
            .field("key_prefix", &self.key_prefix)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Round-trip tests need a running Redis instance and live outside the
    // unit suite.

    #[test]
    fn test_dialogue_key_layout() {
        assert_eq!(
            dialogue_key("menu_bot", ExternalUserId::new(42)),
            "menu_bot:dialogue:42"
        );
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisDialogueStore::connect("not-a-url", "menu_bot", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(StateStoreError::Unavailable(_))));
    }
}
