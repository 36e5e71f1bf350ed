use async_trait::async_trait;

use crate::error::DomainResult;
use crate::types::{Guardian, GuardianVitalsSnapshot, LastKnownLocation, VitalsSnapshot};

/// Maps a wire-level identifier to an internal device.
/// The session/identity layer implements this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceResolver: Send + Sync {
    /// Resolve a wire identifier to a device id; `None` means unknown
    async fn resolve(&self, unique_id: &str) -> DomainResult<Option<i64>>;
}

/// Serves the last known position of a device, used only when a telegram
/// carries no usable coordinate pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LastLocationProvider: Send + Sync {
    async fn last_known(&self, device_id: i64) -> DomainResult<Option<LastKnownLocation>>;
}

/// Persistence collaborator for health telemetry. Append and lookup only;
/// snapshot rows are never updated or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Append a device-scoped vitals snapshot
    async fn append_vitals(&self, snapshot: &VitalsSnapshot) -> DomainResult<()>;

    /// Most recently created guardian linked to the device, if any
    async fn find_guardian_by_device(&self, device_id: i64) -> DomainResult<Option<Guardian>>;

    /// Append a guardian-scoped vitals snapshot
    async fn append_guardian_vitals(&self, snapshot: &GuardianVitalsSnapshot)
        -> DomainResult<()>;
}
