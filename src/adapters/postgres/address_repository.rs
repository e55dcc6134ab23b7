//! PostgreSQL implementation of AddressRepository.
//!
//! `customer_addresses_one_current` is a deferred exclusion constraint, so
//! the flip of `is_current` inside one statement or transaction is checked
//! only at commit.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::customer::{Address, Coordinates, NewAddress};
use crate::domain::foundation::{AddressId, CustomerId, DomainError, ErrorCode, Timestamp};
use crate::ports::AddressRepository;

/// PostgreSQL implementation of AddressRepository.
#[derive(Clone)]
pub struct PostgresAddressRepository {
    pool: PgPool,
}

impl PostgresAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Address>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, latitude, longitude, value, is_current, created_at
            FROM customer_addresses
            WHERE customer_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list addresses", e))?;

        Ok(rows.into_iter().map(row_to_address).collect())
    }

    async fn save_current(
        &self,
        customer_id: CustomerId,
        address: &NewAddress,
    ) -> Result<Address, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        sqlx::query("UPDATE customer_addresses SET is_current = FALSE WHERE customer_id = $1 AND is_current")
            .bind(customer_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear current address", e))?;

        // A location resolving to an already saved value reactivates that row.
        let row = sqlx::query(
            r#"
            INSERT INTO customer_addresses (id, customer_id, latitude, longitude, value, is_current, created_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, NOW())
            ON CONFLICT (customer_id, value) DO UPDATE SET
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                is_current = TRUE
            RETURNING id, customer_id, latitude, longitude, value, is_current, created_at
            "#,
        )
        .bind(AddressId::new().as_uuid())
        .bind(customer_id.as_uuid())
        .bind(address.coordinates.latitude())
        .bind(address.coordinates.longitude())
        .bind(&address.value)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to save address", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit address", e))?;

        Ok(row_to_address(row))
    }

    async fn mark_current(&self, customer_id: CustomerId, address_id: AddressId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE customer_addresses SET is_current = (id = $2)
            WHERE customer_id = $1
              AND EXISTS (
                  SELECT 1 FROM customer_addresses WHERE id = $2 AND customer_id = $1
              )
            "#,
        )
        .bind(customer_id.as_uuid())
        .bind(address_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to mark address current", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AddressNotFound,
                format!("Address not found: {}", address_id),
            )
            .with_detail("customer_id", customer_id.to_string()));
        }

        Ok(())
    }
}

fn row_to_address(row: PgRow) -> Address {
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Address {
        id: AddressId::from_uuid(row.get("id")),
        customer_id: CustomerId::from_uuid(row.get("customer_id")),
        coordinates: Coordinates::from_decimals(row.get("latitude"), row.get("longitude")),
        value: row.get("value"),
        is_current: row.get("is_current"),
        created_at: Timestamp::from_datetime(created_at),
    }
}
