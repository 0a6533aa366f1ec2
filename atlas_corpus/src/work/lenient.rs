//! Forgiving field deserializers for the dataset.
//!
//! Each helper accepts any JSON value and maps shapes it does not
//! understand to "absent" instead of failing the whole record.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{MediaType, WorkId};
use crate::realm::Realm;

fn value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)
}

/// Identifiers may be strings or integers; anything else rejects the record.
pub(super) fn id<'de, D>(deserializer: D) -> Result<WorkId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(WorkId(s.trim().to_string())),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(WorkId(n.to_string())),
        other => Err(D::Error::custom(format!("invalid work id: {other}"))),
    }
}

pub(super) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match value(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub(super) fn opt_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match value(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts an array of strings, or a single comma-separated string.
pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match value(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

pub(super) fn media_type<'de, D>(deserializer: D) -> Result<MediaType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match value(deserializer)? {
        Some(Value::String(s)) => MediaType::from_label(&s),
        _ => MediaType::Unknown,
    })
}

pub(super) fn realm<'de, D>(deserializer: D) -> Result<Option<Realm>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match value(deserializer)? {
        Some(Value::String(s)) => Realm::from_label(&s),
        _ => None,
    })
}
