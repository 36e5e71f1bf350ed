use chrono::{DateTime, TimeZone, Utc};

/// Parse a decimal number token. Malformed input reads as no data.
pub fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse().ok()
}

/// Parse an integer token. Malformed input reads as no data.
pub fn parse_integer(token: &str) -> Option<i32> {
    token.trim().parse().ok()
}

/// Parse a boolean token: true for `"1"` or a case-insensitive `"true"`.
/// Any other token is an explicit false, not missing data.
pub fn parse_boolean(token: &str) -> Option<bool> {
    let token = token.trim();
    Some(token == "1" || token.eq_ignore_ascii_case("true"))
}

/// Parse a device timestamp. Non-digit characters are stripped first; the
/// remaining digits must be exactly `YYMMDDHHMMSS` (year 2000 + YY) or
/// `YYYYMMDDHHMMSS`. Out-of-range calendar components read as no data.
pub fn parse_timestamp(token: &str) -> Option<DateTime<Utc>> {
    let cleaned: String = token.chars().filter(char::is_ascii_digit).collect();

    let (year, rest) = match cleaned.len() {
        12 => (2000 + cleaned[..2].parse::<i32>().ok()?, &cleaned[2..]),
        14 => (cleaned[..4].parse::<i32>().ok()?, &cleaned[4..]),
        _ => return None,
    };

    let month: u32 = rest[..2].parse().ok()?;
    let day: u32 = rest[2..4].parse().ok()?;
    let hour: u32 = rest[4..6].parse().ok()?;
    let minute: u32 = rest[6..8].parse().ok()?;
    let second: u32 = rest[8..10].parse().ok()?;

    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
}
