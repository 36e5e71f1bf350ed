use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::DomainResult;
use crate::repository::HealthStore;
use crate::types::{GuardianVitalsSnapshot, PositionRecord, VitalsSnapshot};

/// Derives vitals snapshots from decoded records and appends them through
/// the persistence collaborator. Best effort: failures are logged and
/// swallowed so health derivation never blocks position handling.
pub struct HealthFanout {
    store: Arc<dyn HealthStore>,
}

impl HealthFanout {
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    /// Fire-and-forget entry point, invoked once per decoded record.
    pub async fn on_record(&self, record: &PositionRecord) {
        if let Err(error) = self.process(record).await {
            warn!(
                device_id = record.device_id,
                error = %error,
                "failed to store health telemetry"
            );
        }
    }

    async fn process(&self, record: &PositionRecord) -> DomainResult<()> {
        let Some(snapshot) = build_snapshot(record) else {
            return Ok(());
        };
        self.store.append_vitals(&snapshot).await?;
        debug!(device_id = snapshot.device_id, "stored device vitals snapshot");

        let Some(guardian) = self.store.find_guardian_by_device(record.device_id).await? else {
            return Ok(());
        };
        let Some(reduced) = build_guardian_snapshot(guardian.id, &snapshot) else {
            return Ok(());
        };
        self.store.append_guardian_vitals(&reduced).await?;
        debug!(guardian_id = guardian.id, "stored guardian vitals snapshot");

        Ok(())
    }
}

/// Canonical event timestamp: fix time, else device-reported time, else
/// arrival time. First non-absent wins.
fn record_time(record: &PositionRecord) -> DateTime<Utc> {
    record
        .fix_time
        .or(record.device_time)
        .unwrap_or(record.server_time)
}

/// Device-scoped snapshot, or `None` when the record carries no vitals at
/// all (an all-absent sub-structure yields no row, not a zero-valued one).
fn build_snapshot(record: &PositionRecord) -> Option<VitalsSnapshot> {
    let vitals = &record.vitals;
    if vitals.is_empty() {
        return None;
    }

    Some(VitalsSnapshot {
        device_id: record.device_id,
        position_id: record.id,
        record_time: record_time(record),
        heart_rate: vitals.heart_rate,
        body_temperature: vitals.body_temperature,
        steps: vitals.steps,
        sleep_minutes: vitals.sleep_minutes,
        sos_active: vitals.sos_active,
        sedentary: vitals.sedentary,
        battery_level: vitals.battery_level,
    })
}

/// Reduced guardian-facing snapshot, or `None` when all four of its
/// fields are absent.
fn build_guardian_snapshot(
    guardian_id: i64,
    snapshot: &VitalsSnapshot,
) -> Option<GuardianVitalsSnapshot> {
    if snapshot.heart_rate.is_none()
        && snapshot.body_temperature.is_none()
        && snapshot.steps.is_none()
        && snapshot.sleep_minutes.is_none()
    {
        return None;
    }

    Some(GuardianVitalsSnapshot {
        guardian_id,
        heart_rate: snapshot.heart_rate,
        temperature: snapshot.body_temperature,
        steps: snapshot.steps,
        sleep: snapshot.sleep_minutes,
        timestamp: snapshot.record_time,
    })
}
