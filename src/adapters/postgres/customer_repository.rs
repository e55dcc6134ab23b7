//! PostgreSQL implementation of CustomerRepository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::customer::{Customer, DeliveryMode, Language, PhoneCapture};
use crate::domain::foundation::{
    ChatId, CustomerId, DomainError, ErrorCode, ExternalUserId, Timestamp,
};
use crate::ports::{CustomerRegistration, CustomerRepository};

const CUSTOMER_COLUMNS: &str = "id, external_user_id, chat_id, phone_number, name, language, \
                                cashback, for_pickup, created_at";

/// PostgreSQL implementation of CustomerRepository.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_external_id(
        &self,
        user_id: ExternalUserId,
    ) -> Result<Option<Customer>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM customers WHERE external_user_id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch customer", e))?;

        row.map(row_to_customer).transpose()
    }

    async fn insert_if_absent(
        &self,
        user_id: ExternalUserId,
        chat_id: ChatId,
    ) -> Result<CustomerRegistration, DomainError> {
        let candidate = Customer::new(user_id, chat_id);

        let result = sqlx::query(
            r#"
            INSERT INTO customers (id, external_user_id, chat_id, cashback, for_pickup, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (external_user_id) DO NOTHING
            "#,
        )
        .bind(candidate.id.as_uuid())
        .bind(user_id.as_i64())
        .bind(chat_id.as_i64())
        .bind(candidate.cashback)
        .bind(candidate.delivery_mode.is_pickup())
        .bind(candidate.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert customer", e))?;

        let created = result.rows_affected() == 1;

        let customer = self.find_by_external_id(user_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::CustomerNotFound,
                format!("Customer vanished after insert: {}", user_id),
            )
        })?;

        Ok(CustomerRegistration { customer, created })
    }

    async fn set_language(&self, id: CustomerId, language: Language) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE customers SET language = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(language.code())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to update language", e))?;

        ensure_found(result.rows_affected(), id)
    }

    async fn record_phone(
        &self,
        id: CustomerId,
        phone_number: &str,
        name: Option<&str>,
    ) -> Result<PhoneCapture, DomainError> {
        // FOR UPDATE serializes racing captures; the loser re-reads the
        // winner's phone and reports first_capture = false.
        let row = sqlx::query(
            r#"
            WITH prev AS (
                SELECT id, phone_number FROM customers WHERE id = $1 FOR UPDATE
            )
            UPDATE customers c SET
                phone_number = $2,
                name = COALESCE(NULLIF(c.name, ''), $3)
            FROM prev
            WHERE c.id = prev.id
            RETURNING COALESCE(prev.phone_number, '') = '' AS first_capture
            "#,
        )
        .bind(id.as_uuid())
        .bind(phone_number)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to record phone", e))?;

        match row {
            Some(row) => Ok(PhoneCapture {
                first_capture: row.get("first_capture"),
            }),
            None => Err(not_found(id)),
        }
    }

    async fn set_delivery_mode(&self, id: CustomerId, mode: DeliveryMode) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE customers SET for_pickup = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(mode.is_pickup())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to update delivery mode", e))?;

        ensure_found(result.rows_affected(), id)
    }
}

fn not_found(id: CustomerId) -> DomainError {
    DomainError::new(ErrorCode::CustomerNotFound, format!("Customer not found: {}", id))
}

fn ensure_found(rows_affected: u64, id: CustomerId) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

fn row_to_customer(row: PgRow) -> Result<Customer, DomainError> {
    let language: Option<String> = row.get("language");
    let language = language
        .map(|code| code.parse::<Language>())
        .transpose()
        .map_err(|e| {
            DomainError::new(ErrorCode::InvalidFormat, format!("Stored language invalid: {}", e))
        })?;

    let cashback: Decimal = row.get("cashback");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Ok(Customer {
        id: CustomerId::from_uuid(row.get("id")),
        external_user_id: ExternalUserId::new(row.get("external_user_id")),
        chat_id: ChatId::new(row.get("chat_id")),
        phone_number: row.get("phone_number"),
        name: row.get("name"),
        language,
        cashback,
        delivery_mode: DeliveryMode::from_pickup_flag(row.get("for_pickup")),
        created_at: Timestamp::from_datetime(created_at),
    })
}
