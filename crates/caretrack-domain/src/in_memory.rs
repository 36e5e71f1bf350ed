use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DomainResult;
use crate::repository::{DeviceResolver, HealthStore, LastLocationProvider};
use crate::types::{Guardian, GuardianVitalsSnapshot, LastKnownLocation, VitalsSnapshot};

/// In-memory device identity and last-location source, for tests and the
/// demo pipeline.
#[derive(Default)]
pub struct InMemoryDeviceRegistry {
    devices: RwLock<HashMap<String, i64>>,
    last_locations: RwLock<HashMap<i64, LastKnownLocation>>,
}

impl InMemoryDeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, unique_id: impl Into<String>, device_id: i64) {
        let mut devices = self.devices.write().await;
        devices.insert(unique_id.into(), device_id);
    }

    pub async fn set_last_known(&self, device_id: i64, location: LastKnownLocation) {
        let mut last_locations = self.last_locations.write().await;
        last_locations.insert(device_id, location);
    }
}

#[async_trait]
impl DeviceResolver for InMemoryDeviceRegistry {
    async fn resolve(&self, unique_id: &str) -> DomainResult<Option<i64>> {
        let devices = self.devices.read().await;
        Ok(devices.get(unique_id).copied())
    }
}

#[async_trait]
impl LastLocationProvider for InMemoryDeviceRegistry {
    async fn last_known(&self, device_id: i64) -> DomainResult<Option<LastKnownLocation>> {
        let last_locations = self.last_locations.read().await;
        Ok(last_locations.get(&device_id).copied())
    }
}

/// In-memory append-only health store with read-back accessors for
/// assertions.
#[derive(Default)]
pub struct InMemoryHealthStore {
    guardians: RwLock<Vec<Guardian>>,
    vitals: RwLock<Vec<VitalsSnapshot>>,
    guardian_vitals: RwLock<Vec<GuardianVitalsSnapshot>>,
}

impl InMemoryHealthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_guardian(&self, guardian: Guardian) {
        let mut guardians = self.guardians.write().await;
        guardians.push(guardian);
    }

    pub async fn vitals(&self) -> Vec<VitalsSnapshot> {
        self.vitals.read().await.clone()
    }

    pub async fn guardian_vitals(&self) -> Vec<GuardianVitalsSnapshot> {
        self.guardian_vitals.read().await.clone()
    }
}

#[async_trait]
impl HealthStore for InMemoryHealthStore {
    async fn append_vitals(&self, snapshot: &VitalsSnapshot) -> DomainResult<()> {
        let mut vitals = self.vitals.write().await;
        vitals.push(snapshot.clone());
        Ok(())
    }

    async fn find_guardian_by_device(&self, device_id: i64) -> DomainResult<Option<Guardian>> {
        let guardians = self.guardians.read().await;
        Ok(guardians
            .iter()
            .filter(|guardian| guardian.device_id == Some(device_id))
            .max_by_key(|guardian| guardian.created_at)
            .cloned())
    }

    async fn append_guardian_vitals(
        &self,
        snapshot: &GuardianVitalsSnapshot,
    ) -> DomainResult<()> {
        let mut guardian_vitals = self.guardian_vitals.write().await;
        guardian_vitals.push(snapshot.clone());
        Ok(())
    }
}
