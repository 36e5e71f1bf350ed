pub mod decoder;
pub mod error;
pub mod health;
pub mod in_memory;
pub mod repository;
pub mod types;

pub use decoder::TelemetryDecoder;
pub use error::{DomainError, DomainResult};
pub use health::HealthFanout;
pub use in_memory::{InMemoryDeviceRegistry, InMemoryHealthStore};
pub use repository::{DeviceResolver, HealthStore, LastLocationProvider};
pub use types::{
    Alarm, Guardian, GuardianVitalsSnapshot, LastKnownLocation, PositionRecord, Vitals,
    VitalsSnapshot,
};
