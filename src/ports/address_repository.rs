//! Address repository port.
//!
//! Every operation that changes the current address keeps the invariant that
//! a customer has at most one address with `is_current = true`, and never
//! exposes a moment where a reader sees zero or two current addresses.

use async_trait::async_trait;

use crate::domain::customer::{Address, NewAddress};
use crate::domain::foundation::{AddressId, CustomerId, DomainError};

/// Repository port for saved delivery addresses.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// All addresses of a customer, most recently created first.
    async fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Address>, DomainError>;

    /// Make `address` the customer's current address.
    ///
    /// In one transaction: clear the current flag on all of the customer's
    /// addresses, then reactivate the address with the same value or insert
    /// it as a new current row.
    async fn save_current(
        &self,
        customer_id: CustomerId,
        address: &NewAddress,
    ) -> Result<Address, DomainError>;

    /// Mark an existing address current and all others not current.
    ///
    /// # Errors
    ///
    /// - `AddressNotFound` if `address_id` doesn't belong to the customer
    async fn mark_current(&self, customer_id: CustomerId, address_id: AddressId) -> Result<(), DomainError>;
}
