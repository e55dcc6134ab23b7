//! In-memory CustomerRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::customer::{Customer, DeliveryMode, Language, PhoneCapture};
use crate::domain::foundation::{ChatId, CustomerId, DomainError, ErrorCode, ExternalUserId};
use crate::ports::{CustomerRegistration, CustomerRepository};

/// Customers held in a map keyed by external user id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<ExternalUserId, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a customer.
    pub async fn insert(&self, customer: Customer) {
        self.customers
            .write()
            .await
            .insert(customer.external_user_id, customer);
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }

    async fn update<T>(
        &self,
        id: CustomerId,
        apply: impl FnOnce(&mut Customer) -> T + Send,
    ) -> Result<T, DomainError> {
        let mut customers = self.customers.write().await;
        let customer = customers
            .values_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CustomerNotFound, format!("Customer not found: {}", id))
            })?;
        Ok(apply(customer))
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_external_id(
        &self,
        user_id: ExternalUserId,
    ) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.read().await.get(&user_id).cloned())
    }

    async fn insert_if_absent(
        &self,
        user_id: ExternalUserId,
        chat_id: ChatId,
    ) -> Result<CustomerRegistration, DomainError> {
        let mut customers = self.customers.write().await;
        if let Some(existing) = customers.get(&user_id) {
            return Ok(CustomerRegistration {
                customer: existing.clone(),
                created: false,
            });
        }
        let customer = Customer::new(user_id, chat_id);
        customers.insert(user_id, customer.clone());
        Ok(CustomerRegistration {
            customer,
            created: true,
        })
    }

    async fn set_language(&self, id: CustomerId, language: Language) -> Result<(), DomainError> {
        self.update(id, |c| c.language = Some(language)).await
    }

    async fn record_phone(
        &self,
        id: CustomerId,
        phone_number: &str,
        name: Option<&str>,
    ) -> Result<PhoneCapture, DomainError> {
        let phone_number = phone_number.to_string();
        let name = name.map(str::to_string);
        self.update(id, move |c| {
            let first_capture = !c.has_phone();
            c.phone_number = Some(phone_number);
            if c.name.as_deref().map_or(true, str::is_empty) {
                c.name = name;
            }
            PhoneCapture { first_capture }
        })
        .await
    }

    async fn set_delivery_mode(&self, id: CustomerId, mode: DeliveryMode) -> Result<(), DomainError> {
        self.update(id, |c| c.delivery_mode = mode).await
    }
}
