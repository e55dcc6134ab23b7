//! PostgreSQL-backed dialogue store.
//!
//! Alternative to Redis when only the relational store is available. One row
//! per user in `dialogue_states`; step and data are written by a single
//! upsert.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::dialogue::{DialogueState, Step};
use crate::domain::foundation::ExternalUserId;
use crate::ports::{DialogueStateStore, StateStoreError};

/// PostgreSQL dialogue store.
pub struct PostgresDialogueStore {
    pool: PgPool,
    closed: AtomicBool,
}

impl PostgresDialogueStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), StateStoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StateStoreError::Closed);
        }
        Ok(())
    }
}

fn unavailable(e: sqlx::Error) -> StateStoreError {
    StateStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl DialogueStateStore for PostgresDialogueStore {
    async fn get(&self, user_id: ExternalUserId) -> Result<Option<DialogueState>, StateStoreError> {
        self.ensure_open()?;

        let row = sqlx::query("SELECT step, data FROM dialogue_states WHERE external_user_id = $1")
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let step: String = row.get("step");
        let data: Value = row.get("data");

        let step = step
            .parse::<Step>()
            .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))?;
        let data = match data {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(StateStoreError::DeserializationFailed(format!(
                    "expected object for dialogue data, got {}",
                    other
                )))
            }
        };

        Ok(Some(DialogueState { step, data }))
    }

    async fn set(&self, user_id: ExternalUserId, state: &DialogueState) -> Result<(), StateStoreError> {
        self.ensure_open()?;

        sqlx::query(
            r#"
            INSERT INTO dialogue_states (external_user_id, step, data, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (external_user_id) DO UPDATE SET
                step = EXCLUDED.step,
                data = EXCLUDED.data,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id.as_i64())
        .bind(state.step.as_str())
        .bind(Value::Object(state.data.clone()))
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }

    async fn clear(&self, user_id: ExternalUserId) -> Result<(), StateStoreError> {
        self.ensure_open()?;

        sqlx::query("DELETE FROM dialogue_states WHERE external_user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    /// Stops accepting calls. The pool itself is shared and closed by its owner.
    async fn close(&self) -> Result<(), StateStoreError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
