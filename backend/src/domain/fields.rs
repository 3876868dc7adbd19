//! Loosely typed request fields and the error map produced by validating them.
//!
//! Inbound payloads are validated before they are parsed into domain types,
//! so validators see the raw shape a client sent: a JSON null, text, a number,
//! or something else entirely. Whether a key was sent at all matters too:
//! aggregators skip absent keys but still validate present-but-empty ones.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::Error;

/// Raw value of a single request field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit `null`.
    Null,
    /// Text as sent by the client.
    Text(String),
    /// Integral JSON number.
    Integer(i64),
    /// Any other JSON value (fractional number, boolean, array, object).
    Other(Value),
}

/// Outcome of reading a field as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerField {
    /// Null or blank text: the caller did not provide a value.
    NotProvided,
    /// A parsed integer.
    Value(i64),
    /// A value that cannot be read as an integer.
    Invalid,
}

impl FieldValue {
    /// Whether the value counts as "not provided" (null or blank text).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Integer(_) | Self::Other(_) => false,
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Read the value as an integer.
    ///
    /// Text is trimmed before parsing; fractional numbers are not integers.
    pub fn as_integer(&self) -> IntegerField {
        match self {
            _ if self.is_blank() => IntegerField::NotProvided,
            Self::Integer(value) => IntegerField::Value(*value),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_or(IntegerField::Invalid, IntegerField::Value),
            Self::Null | Self::Other(_) => IntegerField::Invalid,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(text) => Self::Text(text),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Integer(integer),
                None => match number.as_f64() {
                    // Bounded well inside i64 so the cast is exact.
                    Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => {
                        Self::Integer(float as i64)
                    }
                    _ => Self::Other(Value::Number(number)),
                },
            },
            other => Self::Other(other),
        }
    }
}

/// Named request fields, keyed by the field name the client sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field, returning the updated set.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{FieldValue, Fields};
    ///
    /// let fields = Fields::new().with("tae", "3").with("years", 20_i64);
    /// assert_eq!(fields.get("years"), Some(&FieldValue::Integer(20)));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a field; `None` means the key was absent.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Whether the key was sent.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(name, value)| (name, FieldValue::from(value)))
                .collect(),
        )
    }
}

/// Validation failures keyed by field name.
///
/// Serialises as a flat JSON object, e.g. `{"capital": "Invalid capital"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure held by `outcome`, if any.
    pub fn record<E: std::fmt::Display>(&mut self, field: &str, outcome: Result<(), E>) {
        if let Err(error) = outcome {
            self.0.insert(field.to_owned(), error.to_string());
        }
    }

    /// Record a failure message directly.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether every validated field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Convert into an `invalid_request` error carrying the failures under
    /// `details.fields`.
    pub fn into_error(self) -> Error {
        Error::invalid_request("request fields failed validation")
            .with_details(json!({ "fields": self }))
    }

    /// `Ok(())` when empty, otherwise the `invalid_request` error.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(FieldValue::Null, IntegerField::NotProvided)]
    #[case(FieldValue::from(""), IntegerField::NotProvided)]
    #[case(FieldValue::from("   "), IntegerField::NotProvided)]
    #[case(FieldValue::from(" 42 "), IntegerField::Value(42))]
    #[case(FieldValue::from("-7"), IntegerField::Value(-7))]
    #[case(FieldValue::from("4.5"), IntegerField::Invalid)]
    #[case(FieldValue::from("abc"), IntegerField::Invalid)]
    #[case(FieldValue::Integer(0), IntegerField::Value(0))]
    #[case(FieldValue::from(json!(3.5)), IntegerField::Invalid)]
    #[case(FieldValue::from(json!(true)), IntegerField::Invalid)]
    fn integer_reading(#[case] value: FieldValue, #[case] expected: IntegerField) {
        assert_eq!(value.as_integer(), expected);
    }

    #[rstest]
    fn integral_floats_become_integers() {
        assert_eq!(FieldValue::from(json!(20.0)), FieldValue::Integer(20));
    }

    #[rstest]
    fn fields_from_json_object_keep_absent_and_null_distinct() {
        let Value::Object(map) = json!({ "name": null, "capital": 10 }) else {
            panic!("object literal");
        };
        let fields = Fields::from(map);
        assert_eq!(fields.get("name"), Some(&FieldValue::Null));
        assert_eq!(fields.get("capital"), Some(&FieldValue::Integer(10)));
        assert!(!fields.contains("email"));
    }

    #[rstest]
    fn field_errors_serialise_as_flat_object() {
        let mut errors = FieldErrors::new();
        errors.record::<&str>("capital", Err("Invalid capital"));
        errors.record::<&str>("name", Ok(()));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            serde_json::to_value(&errors).expect("serialise"),
            json!({ "capital": "Invalid capital" })
        );
    }

    #[rstest]
    fn failures_become_invalid_request_details() {
        let mut errors = FieldErrors::new();
        errors.insert("years", "Invalid years");
        let error = errors.into_result().expect_err("failures present");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({ "fields": { "years": "Invalid years" } }))
        );
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
