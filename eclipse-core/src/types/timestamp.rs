//! Timestamp decoding for document-store values
//!
//! Stores hand timestamps back in several shapes: RFC 3339 strings, native
//! timestamp objects (`{"seconds": .., "nanoseconds": ..}`) and bare Unix
//! seconds. All of them decode to `DateTime<Utc>`.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Decode a timestamp value, `None` if it has none of the accepted shapes
pub fn parse(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                let secs = n.as_f64()?;
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9).round() as u32;
                DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
            }
        }
        Value::Object(map) => {
            let secs = map.get("seconds")?.as_i64()?;
            let nanos = match map.get("nanoseconds") {
                Some(n) => u32::try_from(n.as_u64()?).ok()?,
                None => 0,
            };
            DateTime::from_timestamp(secs, nanos)
        }
        _ => None,
    }
}

/// Serde adapter for fields that must hold a timestamp
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse(&value).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", value)))
}
