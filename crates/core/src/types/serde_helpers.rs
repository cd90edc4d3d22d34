//! Lenient deserializers for backend payloads.
//!
//! The REST backend is loosely typed: collections may come back as `null`
//! and numeric-looking fields may be strings or numbers. These helpers keep
//! the typed records readable without pushing `Option`s into every caller.

use serde::{Deserialize, Deserializer, de};

/// Deserialize a value, mapping JSON `null` to `T::default()`.
///
/// Combine with `#[serde(default)]` so that a missing field behaves the same.
///
/// # Errors
///
/// Returns an error if the value is present, non-null and not a valid `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a JSON string or number into its string form.
///
/// # Errors
///
/// Returns an error for booleans, arrays, objects and `null`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a string or a number",
        )),
    }
}

/// Like [`string_or_number`], but `null` and missing values become an empty string.
///
/// # Errors
///
/// Returns an error for booleans, arrays and objects.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a string, a number or null",
        )),
    }
}

/// Deserialize an integer that may arrive as a number, a numeric string or `null`.
///
/// `null`, missing values and blank strings become `0`.
///
/// # Errors
///
/// Returns an error for non-numeric strings, fractional numbers and
/// non-scalar values.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n.as_i64().ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Other("fractional number"), &"an integer")
        }),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(0),
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&s), &"an integer")),
        other => Err(de::Error::invalid_type(unexpected(&other), &"an integer")),
    }
}

fn unexpected(value: &serde_json::Value) -> de::Unexpected<'_> {
    match value {
        serde_json::Value::Null => de::Unexpected::Unit,
        serde_json::Value::Bool(b) => de::Unexpected::Bool(*b),
        serde_json::Value::Array(_) => de::Unexpected::Seq,
        serde_json::Value::Object(_) => de::Unexpected::Map,
        serde_json::Value::String(s) => de::Unexpected::Str(s),
        serde_json::Value::Number(_) => de::Unexpected::Other("number"),
    }
}
