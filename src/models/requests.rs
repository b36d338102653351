//! Request DTOs for the cat API
//!
//! Write requests wrap their attributes in a `cat` envelope:
//! `{"cat": {"name": ..., "age": ..., "enjoys": ..., "image": ...}}`.
//! Unknown attributes are ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{CatError, Result};
use crate::models::validation::{validate, ValidationErrors};
use crate::models::{Cat, NewCat};

/// Request body for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatParams {
    #[serde(default, deserialize_with = "envelope")]
    pub cat: Option<CatAttributes>,
}

impl CatParams {
    /// Unwraps the envelope, failing when `cat` is missing, null, empty or
    /// not an object.
    pub fn require_cat(self) -> Result<CatAttributes> {
        self.cat.ok_or(CatError::ParameterMissing("cat"))
    }
}

/// Submitted attributes.
///
/// The outer `Option` tells whether the key was sent at all; the inner one
/// holds the value, `None` meaning null or a value that cannot be cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatAttributes {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub enjoys: Option<Option<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<Option<String>>,
}

impl CatAttributes {
    /// Validates the attributes as a brand new record.
    pub fn into_new_cat(self) -> std::result::Result<NewCat, ValidationErrors> {
        validate(
            self.name.flatten(),
            self.age.flatten(),
            self.enjoys.flatten(),
            self.image.flatten(),
        )
    }

    /// Merges the attributes over an existing record, then validates.
    ///
    /// Keys that were not sent keep the stored value.
    pub fn merge_into(self, cat: &Cat) -> std::result::Result<NewCat, ValidationErrors> {
        validate(
            self.name.unwrap_or_else(|| Some(cat.name.clone())),
            self.age.unwrap_or(Some(cat.age)),
            self.enjoys.unwrap_or_else(|| Some(cat.enjoys.clone())),
            self.image.unwrap_or_else(|| cat.image.clone()),
        )
    }
}

/// Only a non-empty object counts as a `cat` parameter.
fn envelope<'de, D>(deserializer: D) -> std::result::Result<Option<CatAttributes>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) if !map.is_empty() => serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Strings pass through, numbers and booleans are cast to text.
/// Null, arrays and objects count as blank.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    };
    Ok(Some(text))
}

/// Accepts a JSON number or a numeric string, truncating fractions.
/// Non-numeric or out-of-range values count as blank.
fn lenient_age<'de, D>(deserializer: D) -> std::result::Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(Some(number.and_then(truncate_to_i32)))
}

fn truncate_to_i32(value: f64) -> Option<i32> {
    let truncated = value.trunc();
    let in_range = truncated >= f64::from(i32::MIN) && truncated <= f64::from(i32::MAX);
    (value.is_finite() && in_range).then_some(truncated as i32)
}
