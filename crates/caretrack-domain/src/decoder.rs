use std::sync::Arc;

use caretrack_telegram::{
    parse_boolean, parse_integer, parse_number, parse_timestamp, SentenceTokens,
};
use tracing::debug;

use crate::error::DomainResult;
use crate::repository::{DeviceResolver, LastLocationProvider};
use crate::types::{Alarm, PositionRecord, Vitals};

/// Literal token opening the positional telegram form, matched
/// case-insensitively.
const PROTOCOL_SIGNATURE: &str = "FA66";

/// Turns one raw telegram into a `PositionRecord`, resolving each field
/// through an ordered key/value-then-positional fallback chain. Malformed
/// tokens degrade to absent fields; only an unknown or missing device
/// identifier drops the telegram as a whole.
pub struct TelemetryDecoder {
    resolver: Arc<dyn DeviceResolver>,
    locations: Arc<dyn LastLocationProvider>,
}

impl TelemetryDecoder {
    pub fn new(
        resolver: Arc<dyn DeviceResolver>,
        locations: Arc<dyn LastLocationProvider>,
    ) -> Self {
        Self {
            resolver,
            locations,
        }
    }

    /// Decode one sentence. `Ok(None)` means the telegram was dropped:
    /// blank input, no identifier, or an identifier no device maps to.
    pub async fn decode(&self, sentence: &str) -> DomainResult<Option<PositionRecord>> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Ok(None);
        }

        let tokens = SentenceTokens::parse(sentence);

        let Some(unique_id) = resolve_identifier(&tokens) else {
            debug!("telegram carries no device identifier, dropping");
            return Ok(None);
        };
        let Some(device_id) = self.resolver.resolve(unique_id).await? else {
            debug!(unique_id = %unique_id, "unknown device, dropping telegram");
            return Ok(None);
        };

        let mut latitude = tokens.keyed(&["lat", "latitude"]).and_then(parse_number);
        let mut longitude = tokens.keyed(&["lon", "longitude"]).and_then(parse_number);
        // Coordinates stay a same-tier pair: when either is missing from
        // the keyed view, both come from the positional view.
        if (latitude.is_none() || longitude.is_none()) && tokens.positional_len() >= 4 {
            latitude = tokens.positional(2).and_then(parse_number);
            longitude = tokens.positional(3).and_then(parse_number);
        }

        let mut speed = tokens.keyed(&["speed"]).and_then(parse_number);
        let mut course = tokens.keyed(&["course"]).and_then(parse_number);
        if speed.is_none() && tokens.positional_len() >= 6 {
            speed = tokens.positional(4).and_then(parse_number);
            course = tokens.positional(5).and_then(parse_number);
        }

        let altitude = tokens
            .keyed(&["alt"])
            .and_then(parse_number)
            .or_else(|| tokens.positional(6).and_then(parse_number));

        let mut time = tokens
            .keyed(&["time", "timestamp"])
            .and_then(parse_timestamp);
        if time.is_none() && tokens.positional_len() >= 3 {
            time = tokens.last_positional().and_then(parse_timestamp);
        }

        let mut record = PositionRecord::new(device_id);

        if let (Some(lat), Some(lon)) = (latitude, longitude) {
            record.valid = true;
            record.latitude = Some(lat);
            record.longitude = Some(lon);
            record.altitude = Some(altitude.unwrap_or(0.0));
            record.speed = Some(speed.unwrap_or(0.0));
            record.course = Some(course.unwrap_or(0.0));
        } else if let Some(last) = self.locations.last_known(device_id).await? {
            record.latitude = last.latitude;
            record.longitude = last.longitude;
            record.altitude = last.altitude;
            record.speed = last.speed;
            record.course = last.course;
        }

        record.fix_time = time;
        record.device_time = time;

        record.vitals = Vitals {
            heart_rate: field(&tokens, &["hr", "heartrate"], 8, parse_integer),
            body_temperature: field(&tokens, &["temp", "temperature"], 9, parse_number),
            steps: field(&tokens, &["steps", "walk"], 10, parse_integer),
            sleep_minutes: field(&tokens, &["sleep", "sleepmin"], 11, parse_integer),
            sos_active: field(&tokens, &["sos", "alert"], 12, parse_boolean),
            sedentary: field(&tokens, &["sed", "sedentary"], 13, parse_boolean),
            battery_level: field(&tokens, &["bat", "battery"], 7, parse_integer),
        };
        if record.vitals.sos_active == Some(true) {
            record.alarm = Some(Alarm::Sos);
        }

        Ok(Some(record))
    }
}

/// Keyed `imei`/`id`, else positional token 1 behind the protocol
/// signature.
fn resolve_identifier(tokens: &SentenceTokens) -> Option<&str> {
    tokens.keyed(&["imei", "id"]).or_else(|| {
        let signature = tokens.positional(0)?;
        if signature
            .to_ascii_uppercase()
            .starts_with(PROTOCOL_SIGNATURE)
        {
            tokens.positional(1)
        } else {
            None
        }
    })
}

/// One ordered fallback chain: keyed alternates first, then a fixed
/// positional index when that index exists in the token list.
fn field<T>(
    tokens: &SentenceTokens,
    names: &[&str],
    index: usize,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    tokens
        .keyed(names)
        .and_then(parse)
        .or_else(|| tokens.positional(index).and_then(parse))
}
