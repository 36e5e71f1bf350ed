//! End-to-end pipeline tests: raw sentence → decoder → health fan-out,
//! over in-memory collaborators.

use std::sync::Arc;

use caretrack_domain::{
    Guardian, HealthFanout, InMemoryDeviceRegistry, InMemoryHealthStore, TelemetryDecoder,
};
use chrono::{TimeZone, Utc};

const IMEI: &str = "123456789012345";

async fn registry_with_device(device_id: i64) -> Arc<InMemoryDeviceRegistry> {
    let registry = Arc::new(InMemoryDeviceRegistry::new());
    registry.register(IMEI, device_id).await;
    registry
}

#[tokio::test]
async fn keyed_sentence_flows_into_both_snapshots() {
    let registry = registry_with_device(1).await;
    let store = Arc::new(InMemoryHealthStore::new());
    store
        .add_guardian(Guardian {
            id: 10,
            name: "Ada".to_string(),
            last_name: "Moretti".to_string(),
            birth_date: None,
            device_id: Some(1),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        })
        .await;

    let decoder = TelemetryDecoder::new(registry.clone(), registry.clone());
    let fanout = HealthFanout::new(store.clone());

    let mut record = decoder
        .decode("imei=123456789012345;lat=45.5;lon=9.2;hr=78;temp=36.6;time=240101120000")
        .await
        .unwrap()
        .expect("known device telegram must decode");

    assert!(record.valid);
    assert_eq!(record.latitude, Some(45.5));
    assert_eq!(record.longitude, Some(9.2));

    // The host persists the position and hands the id to the fan-out.
    record.id = Some(77);
    fanout.on_record(&record).await;

    let vitals = store.vitals().await;
    assert_eq!(vitals.len(), 1);
    assert_eq!(vitals[0].device_id, 1);
    assert_eq!(vitals[0].position_id, Some(77));
    assert_eq!(vitals[0].heart_rate, Some(78));
    assert_eq!(vitals[0].body_temperature, Some(36.6));
    assert_eq!(
        vitals[0].record_time,
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    );

    let guardian_vitals = store.guardian_vitals().await;
    assert_eq!(guardian_vitals.len(), 1);
    assert_eq!(guardian_vitals[0].guardian_id, 10);
    assert_eq!(guardian_vitals[0].heart_rate, Some(78));
    assert_eq!(guardian_vitals[0].temperature, Some(36.6));
    assert_eq!(guardian_vitals[0].steps, None);
    assert_eq!(guardian_vitals[0].sleep, None);
}

#[tokio::test]
async fn positional_sentence_without_guardian_writes_device_row_only() {
    let registry = registry_with_device(2).await;
    let store = Arc::new(InMemoryHealthStore::new());

    let decoder = TelemetryDecoder::new(registry.clone(), registry.clone());
    let fanout = HealthFanout::new(store.clone());

    let record = decoder
        .decode("FA66,123456789012345,45.5,9.2,10,90,100,85,78")
        .await
        .unwrap()
        .expect("positional telegram must decode");

    assert!(record.valid);
    assert_eq!(record.speed, Some(10.0));
    assert_eq!(record.altitude, Some(100.0));

    fanout.on_record(&record).await;

    let vitals = store.vitals().await;
    assert_eq!(vitals.len(), 1);
    assert_eq!(vitals[0].battery_level, Some(85));
    assert_eq!(vitals[0].heart_rate, Some(78));
    assert!(store.guardian_vitals().await.is_empty());
}

#[tokio::test]
async fn vitals_free_telegram_leaves_the_store_untouched() {
    let registry = registry_with_device(3).await;
    let store = Arc::new(InMemoryHealthStore::new());

    let decoder = TelemetryDecoder::new(registry.clone(), registry.clone());
    let fanout = HealthFanout::new(store.clone());

    let record = decoder
        .decode("imei=123456789012345;lat=45.5;lon=9.2")
        .await
        .unwrap()
        .unwrap();

    fanout.on_record(&record).await;

    assert!(store.vitals().await.is_empty());
    assert!(store.guardian_vitals().await.is_empty());
}

#[tokio::test]
async fn unknown_device_telegram_is_fully_dropped() {
    let registry = Arc::new(InMemoryDeviceRegistry::new());
    let decoder = TelemetryDecoder::new(registry.clone(), registry.clone());

    let record = decoder
        .decode("imei=999999999999999;lat=45.5;lon=9.2;hr=78")
        .await
        .unwrap();

    assert!(record.is_none());
}
