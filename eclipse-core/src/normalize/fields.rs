//! Typed accessors over loosely-typed records
//!
//! Each accessor yields `None` when the key is absent or holds the wrong
//! type. Array accessors are all-or-nothing: one element of the wrong type
//! discards the whole array.

use crate::store::Fields;
use crate::types::{timestamp, RatingMap};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub fn string(fields: &Fields, key: &str) -> Option<String> {
    fields.get(key)?.as_str().map(str::to_owned)
}

/// String with leading/trailing whitespace and newlines removed
pub fn trimmed_string(fields: &Fields, key: &str) -> Option<String> {
    fields.get(key)?.as_str().map(|s| s.trim().to_owned())
}

pub fn string_array(fields: &Fields, key: &str) -> Option<Vec<String>> {
    fields
        .get(key)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

pub fn float(fields: &Fields, key: &str) -> Option<f64> {
    fields.get(key)?.as_f64()
}

/// Non-negative integer that fits in a `u32`
pub fn count(fields: &Fields, key: &str) -> Option<u32> {
    u32::try_from(fields.get(key)?.as_u64()?).ok()
}

pub fn boolean(fields: &Fields, key: &str) -> Option<bool> {
    fields.get(key)?.as_bool()
}

pub fn object<'a>(fields: &'a Fields, key: &str) -> Option<&'a Fields> {
    fields.get(key)?.as_object()
}

pub fn array<'a>(fields: &'a Fields, key: &str) -> Option<&'a Vec<Value>> {
    fields.get(key)?.as_array()
}

pub fn timestamp(fields: &Fields, key: &str) -> Option<DateTime<Utc>> {
    timestamp::parse(fields.get(key)?)
}

/// A flat map of numeric scores; any non-numeric value rejects the map
pub fn rating_map(fields: &Fields, key: &str) -> Option<RatingMap> {
    object(fields, key)?
        .iter()
        .map(|(k, v)| v.as_f64().map(|score| (k.clone(), score)))
        .collect()
}
