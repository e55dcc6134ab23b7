//! PostgreSQL implementation of DeliveryZoneReader.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::domain::delivery::DeliveryZone;
use crate::domain::foundation::{DomainError, ZoneId};
use crate::ports::DeliveryZoneReader;

/// Reads active zones from `delivery_zones`.
#[derive(Clone)]
pub struct PostgresDeliveryZoneReader {
    pool: PgPool,
}

impl PostgresDeliveryZoneReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryZoneReader for PostgresDeliveryZoneReader {
    async fn active_zones(&self) -> Result<Vec<DeliveryZone>, DomainError> {
        let rows = sqlx::query("SELECT id, is_active, geometry FROM delivery_zones WHERE is_active")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch delivery zones", e))?;

        Ok(rows
            .into_iter()
            .map(|row| DeliveryZone {
                id: ZoneId::from_uuid(row.get("id")),
                is_active: row.get("is_active"),
                geometry: row.get::<Option<Value>, _>("geometry"),
            })
            .collect())
    }
}
