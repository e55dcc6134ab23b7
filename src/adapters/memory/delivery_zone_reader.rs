//! In-memory DeliveryZoneReader.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::delivery::DeliveryZone;
use crate::domain::foundation::DomainError;
use crate::ports::DeliveryZoneReader;

/// Zones held in memory; inactive ones are filtered on read.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryZoneReader {
    zones: Arc<RwLock<Vec<DeliveryZone>>>,
}

impl InMemoryDeliveryZoneReader {
    pub fn new(zones: Vec<DeliveryZone>) -> Self {
        Self {
            zones: Arc::new(RwLock::new(zones)),
        }
    }

    pub async fn add(&self, zone: DeliveryZone) {
        self.zones.write().await.push(zone);
    }
}

#[async_trait]
impl DeliveryZoneReader for InMemoryDeliveryZoneReader {
    async fn active_zones(&self) -> Result<Vec<DeliveryZone>, DomainError> {
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter(|z| z.is_active)
            .cloned()
            .collect())
    }
}
