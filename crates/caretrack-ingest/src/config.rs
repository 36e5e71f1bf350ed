use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable OpenTelemetry export
    #[serde(default)]
    pub otel_enabled: bool,

    /// OTLP endpoint for traces and logs
    #[serde(default = "default_otel_endpoint")]
    pub otel_endpoint: String,

    /// Service name reported to telemetry backends
    #[serde(default = "default_otel_service_name")]
    pub otel_service_name: String,

    /// Comma-separated wire identifiers accepted as known devices
    #[serde(default)]
    pub known_devices: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("CARETRACK"))
            .build()?
            .try_deserialize()
    }

    /// Known-device identifiers, empty entries discarded.
    pub fn known_devices(&self) -> Vec<String> {
        self.known_devices
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_otel_service_name() -> String {
    "caretrack-ingest".to_string()
}
