//! Settings-table text resolver.
//!
//! Texts and switches live in `bot_settings (key, value JSONB)` and are edited
//! by operators while the bot runs. The resolver serves lookups from an
//! in-memory snapshot that a background task reloads on an interval.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::foundation::DomainError;
use crate::ports::TextResolver;

/// Snapshot-backed resolver over `bot_settings`.
#[derive(Clone)]
pub struct PostgresTextResolver {
    pool: PgPool,
    snapshot: Arc<RwLock<HashMap<String, Value>>>,
}

impl PostgresTextResolver {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            snapshot: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replace the snapshot with the current table contents.
    ///
    /// On error the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let rows = sqlx::query("SELECT key, value FROM bot_settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to load bot settings", e))?;

        let fresh: HashMap<String, Value> = rows
            .into_iter()
            .map(|row| (row.get::<String, _>("key"), row.get::<Value, _>("value")))
            .collect();
        let count = fresh.len();

        *self.snapshot.write().await = fresh;
        Ok(count)
    }

    /// Reload every `interval` until the handle is aborted.
    pub fn spawn_refresh(&self, interval: Duration) -> JoinHandle<()> {
        let resolver = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick fires immediately; the caller has already loaded.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match resolver.refresh().await {
                    Ok(count) => tracing::debug!(keys = count, "Bot settings refreshed"),
                    Err(e) => tracing::warn!(error = %e, "Bot settings refresh failed; keeping previous snapshot"),
                }
            }
        })
    }
}

#[async_trait]
impl TextResolver for PostgresTextResolver {
    async fn resolve(&self, key: &str) -> Option<Value> {
        self.snapshot.read().await.get(key).cloned()
    }
}

impl std::fmt::Debug for PostgresTextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresTextResolver").finish_non_exhaustive()
    }
}
