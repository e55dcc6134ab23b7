//! Customer repository port (write side).
//!
//! Customers are keyed by the platform's external user id, which is unique.
//! Records are created lazily and never deleted by the dialogue.

use async_trait::async_trait;

use crate::domain::customer::{Customer, DeliveryMode, Language, PhoneCapture};
use crate::domain::foundation::{ChatId, CustomerId, DomainError, ExternalUserId};

/// Outcome of an insert-if-absent.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRegistration {
    pub customer: Customer,
    /// True if this call inserted the row.
    pub created: bool,
}

/// Repository port for Customer persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by external user id.
    ///
    /// Returns `None` if not found.
    async fn find_by_external_id(
        &self,
        user_id: ExternalUserId,
    ) -> Result<Option<Customer>, DomainError>;

    /// Insert a customer unless one exists for `user_id`.
    ///
    /// Idempotent under concurrent first contacts: exactly one caller sees
    /// `created = true`.
    async fn insert_if_absent(
        &self,
        user_id: ExternalUserId,
        chat_id: ChatId,
    ) -> Result<CustomerRegistration, DomainError>;

    /// Persist the chosen language.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if the customer doesn't exist
    async fn set_language(&self, id: CustomerId, language: Language) -> Result<(), DomainError>;

    /// Store a shared phone number; fill `name` only if none is stored yet.
    ///
    /// The read of the previous phone and the write happen atomically, so
    /// `first_capture` is true for exactly one of several racing calls.
    async fn record_phone(
        &self,
        id: CustomerId,
        phone_number: &str,
        name: Option<&str>,
    ) -> Result<PhoneCapture, DomainError>;

    /// Persist the delivery/pickup preference.
    async fn set_delivery_mode(&self, id: CustomerId, mode: DeliveryMode) -> Result<(), DomainError>;
}
