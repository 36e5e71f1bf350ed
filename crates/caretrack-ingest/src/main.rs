mod config;
mod telemetry;

use std::sync::Arc;

use caretrack_domain::{HealthFanout, InMemoryDeviceRegistry, InMemoryHealthStore, TelemetryDecoder};
use config::ServiceConfig;
use telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig, TelemetryProviders};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let telemetry_providers: Option<TelemetryProviders> = match init_telemetry(&TelemetryConfig {
        service_name: config.otel_service_name.clone(),
        otel_endpoint: config.otel_endpoint.clone(),
        otel_enabled: config.otel_enabled,
        log_level: config.log_level.clone(),
    }) {
        Ok(providers) => providers,
        Err(e) => {
            eprintln!("Failed to initialize telemetry: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        otel_enabled = config.otel_enabled,
        "Starting caretrack-ingest"
    );

    // Device identities come from configuration; internal ids are their
    // one-based positions in the list.
    let registry = Arc::new(InMemoryDeviceRegistry::new());
    for (index, unique_id) in config.known_devices().into_iter().enumerate() {
        info!(unique_id = %unique_id, device_id = index as i64 + 1, "registering device");
        registry.register(unique_id, index as i64 + 1).await;
    }

    let store = Arc::new(InMemoryHealthStore::new());
    let decoder = TelemetryDecoder::new(registry.clone(), registry.clone());
    let fanout = HealthFanout::new(store.clone());

    // One telegram per input line; the host position store is simulated
    // by a running row counter.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_position_id: i64 = 1;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match decoder.decode(&line).await {
                Ok(Some(mut record)) => {
                    record.id = Some(next_position_id);
                    next_position_id += 1;
                    info!(
                        device_id = record.device_id,
                        valid = record.valid,
                        sos = record.alarm.is_some(),
                        "decoded position"
                    );
                    fanout.on_record(&record).await;
                }
                Ok(None) => debug!("dropped telegram"),
                Err(e) => warn!(error = %e, "decode failed"),
            },
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "failed reading input");
                break;
            }
        }
    }

    info!(
        device_snapshots = store.vitals().await.len(),
        guardian_snapshots = store.guardian_vitals().await.len(),
        "input exhausted, shutting down"
    );

    shutdown_telemetry(telemetry_providers);
}
