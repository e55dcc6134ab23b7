//! Delivery zone reader port (read side).

use async_trait::async_trait;

use crate::domain::delivery::DeliveryZone;
use crate::domain::foundation::DomainError;

/// Read-only access to delivery zones.
#[async_trait]
pub trait DeliveryZoneReader: Send + Sync {
    /// Zones with the active flag set. Zero zones is legal.
    async fn active_zones(&self) -> Result<Vec<DeliveryZone>, DomainError>;
}
