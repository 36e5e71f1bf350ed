use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alarm indicator raised alongside a decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alarm {
    Sos,
}

/// Vitals readings carried by one telegram. A `None` field means the
/// telegram carried no data for it; zero values are legitimate readings
/// and stay distinguishable from absence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vitals {
    pub heart_rate: Option<i32>,
    pub body_temperature: Option<f64>,
    pub steps: Option<i32>,
    pub sleep_minutes: Option<i32>,
    pub sos_active: Option<bool>,
    pub sedentary: Option<bool>,
    pub battery_level: Option<i32>,
}

impl Vitals {
    /// True when no vitals field carries a reading.
    pub fn is_empty(&self) -> bool {
        self.heart_rate.is_none()
            && self.body_temperature.is_none()
            && self.steps.is_none()
            && self.sleep_minutes.is_none()
            && self.sos_active.is_none()
            && self.sedentary.is_none()
            && self.battery_level.is_none()
    }
}

/// Decoded output of one telegram. Transient: constructed per sentence,
/// consumed once by position handling and the health fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    /// Assigned by the host once the position row is persisted.
    pub id: Option<i64>,
    pub device_id: i64,
    /// True only when both coordinates parsed from the same source tier.
    pub valid: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub fix_time: Option<DateTime<Utc>>,
    pub device_time: Option<DateTime<Utc>>,
    /// Arrival time, set when the record is assembled.
    pub server_time: DateTime<Utc>,
    pub alarm: Option<Alarm>,
    pub vitals: Vitals,
}

impl PositionRecord {
    pub fn new(device_id: i64) -> Self {
        Self {
            id: None,
            device_id,
            valid: false,
            latitude: None,
            longitude: None,
            altitude: None,
            speed: None,
            course: None,
            fix_time: None,
            device_time: None,
            server_time: Utc::now(),
            alarm: None,
            vitals: Vitals::default(),
        }
    }
}

/// Partial position fields served by the last-location collaborator when
/// a telegram carries no usable coordinate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastKnownLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
}

/// Device-scoped vitals row. Append-only; corrections arrive as new rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    pub device_id: i64,
    pub position_id: Option<i64>,
    pub record_time: DateTime<Utc>,
    pub heart_rate: Option<i32>,
    pub body_temperature: Option<f64>,
    pub steps: Option<i32>,
    pub sleep_minutes: Option<i32>,
    pub sos_active: Option<bool>,
    pub sedentary: Option<bool>,
    pub battery_level: Option<i32>,
}

/// Reduced vitals row linked to a guardian-facing entity. No
/// SOS/sedentary/battery: guardians see wellbeing fields only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardianVitalsSnapshot {
    pub guardian_id: i64,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub steps: Option<i32>,
    pub sleep: Option<i32>,
    pub timestamp: DateTime<Utc>,
}

/// Externally owned guardian-facing entity. The core only reads its
/// device link; it never creates, updates or deletes guardians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub birth_date: Option<DateTime<Utc>>,
    pub device_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}
