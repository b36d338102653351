//! Presence validation for cat attributes.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::NewCat;

/// Message attached to a required attribute that is missing or blank.
pub const BLANK_MESSAGE: &str = "can't be blank";

// == Validation Errors ==
/// Field name to error messages, serialized as a bare JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the given field's list.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Records a blank error for `field` unless `value` holds something.
    pub fn require_text(&mut self, field: &str, value: Option<&str>) {
        if is_blank(value) {
            self.add(field, BLANK_MESSAGE);
        }
    }

    /// Records a blank error for `field` when `value` is absent.
    pub fn require<T>(&mut self, field: &str, value: Option<&T>) {
        if value.is_none() {
            self.add(field, BLANK_MESSAGE);
        }
    }
}

// Renders "Name can't be blank, Age can't be blank"
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                write!(f, "{} {}", humanize(field), message)?;
            }
        }
        Ok(())
    }
}

// == Validation ==
/// Requires `name`, `age` and `enjoys`, reporting every blank field.
pub fn validate(
    name: Option<String>,
    age: Option<i32>,
    enjoys: Option<String>,
    image: Option<String>,
) -> std::result::Result<NewCat, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_text("name", name.as_deref());
    errors.require("age", age.as_ref());
    errors.require_text("enjoys", enjoys.as_deref());

    match (name, age, enjoys) {
        (Some(name), Some(age), Some(enjoys)) if errors.is_empty() => Ok(NewCat {
            name,
            age,
            enjoys,
            image,
        }),
        _ => Err(errors),
    }
}

/// True when the value is missing or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn humanize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}
