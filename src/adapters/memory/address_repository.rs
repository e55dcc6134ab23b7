//! In-memory AddressRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::customer::{Address, NewAddress};
use crate::domain::foundation::{AddressId, CustomerId, DomainError, ErrorCode, Timestamp};
use crate::ports::AddressRepository;

/// Addresses in insertion order. The write lock makes each flag change
/// atomic to readers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressRepository {
    rows: Arc<RwLock<Vec<Address>>>,
}

impl InMemoryAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing address as-is.
    pub async fn insert(&self, address: Address) {
        self.rows.write().await.push(address);
    }

    /// Every row, for assertions.
    pub async fn all(&self) -> Vec<Address> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Address>, DomainError> {
        // Later inserts are newer; stable sort keeps that order on timestamp ties.
        let mut addresses: Vec<Address> = self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect();
        addresses.sort_by(|a, b| b.created_at.as_datetime().cmp(a.created_at.as_datetime()));
        Ok(addresses)
    }

    async fn save_current(
        &self,
        customer_id: CustomerId,
        address: &NewAddress,
    ) -> Result<Address, DomainError> {
        let mut rows = self.rows.write().await;

        for row in rows.iter_mut().filter(|a| a.customer_id == customer_id) {
            row.is_current = false;
        }

        if let Some(existing) = rows
            .iter_mut()
            .find(|a| a.customer_id == customer_id && a.value == address.value)
        {
            existing.coordinates = address.coordinates;
            existing.is_current = true;
            return Ok(existing.clone());
        }

        let created = Address {
            id: AddressId::new(),
            customer_id,
            coordinates: address.coordinates,
            value: address.value.clone(),
            is_current: true,
            created_at: Timestamp::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn mark_current(&self, customer_id: CustomerId, address_id: AddressId) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;

        if !rows
            .iter()
            .any(|a| a.customer_id == customer_id && a.id == address_id)
        {
            return Err(DomainError::new(
                ErrorCode::AddressNotFound,
                format!("Address not found: {}", address_id),
            ));
        }

        for row in rows.iter_mut().filter(|a| a.customer_id == customer_id) {
            row.is_current = row.id == address_id;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Coordinates;

    fn new_address(value: &str) -> NewAddress {
        NewAddress::new(Coordinates::from_degrees(41.3, 69.2).unwrap(), value).unwrap()
    }

    async fn current_count(repo: &InMemoryAddressRepository, customer: CustomerId) -> usize {
        repo.list_for_customer(customer)
            .await
            .unwrap()
            .iter()
            .filter(|a| a.is_current)
            .count()
    }

    #[tokio::test]
    async fn test_save_current_moves_flag() {
        let repo = InMemoryAddressRepository::new();
        let customer = CustomerId::new();

        let home = repo.save_current(customer, &new_address("Home")).await.unwrap();
        let work = repo.save_current(customer, &new_address("Work")).await.unwrap();

        let listed = repo.list_for_customer(customer).await.unwrap();
        assert_eq!(listed[0].id, work.id);
        assert_eq!(listed[1].id, home.id);
        assert!(listed[0].is_current);
        assert!(!listed[1].is_current);
    }

    #[tokio::test]
    async fn test_save_current_reactivates_same_value() {
        let repo = InMemoryAddressRepository::new();
        let customer = CustomerId::new();

        let first = repo.save_current(customer, &new_address("Home")).await.unwrap();
        repo.save_current(customer, &new_address("Work")).await.unwrap();
        let again = repo.save_current(customer, &new_address("Home")).await.unwrap();

        assert_eq!(first.id, again.id);
        assert_eq!(repo.all().await.len(), 2);
        assert_eq!(current_count(&repo, customer).await, 1);
    }

    #[tokio::test]
    async fn test_mark_current_keeps_single_flag() {
        let repo = InMemoryAddressRepository::new();
        let customer = CustomerId::new();
        let a = repo.save_current(customer, &new_address("A")).await.unwrap();
        let b = repo.save_current(customer, &new_address("B")).await.unwrap();

        for id in [a.id, b.id, a.id, a.id] {
            repo.mark_current(customer, id).await.unwrap();
            assert_eq!(current_count(&repo, customer).await, 1);
        }
    }

    #[tokio::test]
    async fn test_mark_current_foreign_address_leaves_flags() {
        let repo = InMemoryAddressRepository::new();
        let owner = CustomerId::new();
        let other = CustomerId::new();
        let a = repo.save_current(owner, &new_address("A")).await.unwrap();

        let err = repo.mark_current(other, a.id).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::AddressNotFound);
        assert_eq!(current_count(&repo, owner).await, 1);
    }
}
