//! Field decoders that degrade malformed values to "absent" instead of
//! failing the whole snapshot.
//!
//! Only the shape of the tree (lists of groups, placements and ingredients)
//! is decoded strictly. Leaf values written by users (quantities, units,
//! servings, dates) come through free-form forms and CSV imports, so a bad
//! one must never abort a shopping list.

use chrono::NaiveDate;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::quantity::{check_measure, parse_quantity};

/// Coerce a JSON value into a non-negative finite number
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|v| check_measure(v).ok()),
        Value::String(s) => parse_quantity(s).ok(),
        _ => None,
    }
}

/// Coerce a JSON value into free text
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a JSON value into an integer identifier
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_text(&value))
}

/// Like [`text`] but collapses an absent value into an empty string
pub fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text(deserializer).map(Option::unwrap_or_default)
}

pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_integer(&value))
}

pub fn ordinal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    integer(deserializer).map(Option::unwrap_or_default)
}

pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

/// Decode a nested object, treating `null` and non-object values as absent.
///
/// A present object is still decoded strictly: its own lists must be lists.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Decode a list of nested records. `null` is an empty list; anything other
/// than an array makes the tree untraversable.
///
/// Elements that are not objects are skipped, so one broken record does not
/// take the rest of the list down with it.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                if !item.is_object() {
                    tracing::debug!(index, found = kind(&item), "skipping non-object record");
                    continue;
                }
                records.push(serde_json::from_value(item).map_err(D::Error::custom)?);
            }
            Ok(records)
        }
        other => Err(D::Error::custom(format!(
            "expected an array, found {}",
            kind(&other)
        ))),
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
