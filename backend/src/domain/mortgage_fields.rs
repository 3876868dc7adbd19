//! Mortgage term validators and their aggregation.

use crate::domain::{FieldErrors, FieldValue, Fields, IntegerField};

/// Request key carrying the annual rate (TAE) as a whole-number percentage.
pub const RATE_FIELD: &str = "tae";
/// Request key carrying the term in years.
pub const TERM_FIELD: &str = "years";

/// Highest accepted TAE.
pub const MAX_RATE: i64 = 100;

/// TAE validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RateError {
    #[error("Invalid tae")]
    Invalid,
    #[error("TAE cannot be negative")]
    Negative,
    #[error("TAE cannot be greater than 100")]
    AboveMaximum,
}

/// Term validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    #[error("Invalid years")]
    Invalid,
    #[error("Years cannot be negative")]
    Negative,
}

/// TAE must be an integer in `0..=100`. Blank means "not provided".
///
/// # Examples
/// ```
/// use backend::domain::{FieldValue, RateError, validate_rate};
///
/// assert_eq!(validate_rate(&FieldValue::from("150")), Err(RateError::AboveMaximum));
/// assert_eq!(validate_rate(&FieldValue::from("-1")), Err(RateError::Negative));
/// ```
pub fn validate_rate(value: &FieldValue) -> Result<(), RateError> {
    match value.as_integer() {
        IntegerField::NotProvided => Ok(()),
        IntegerField::Invalid => Err(RateError::Invalid),
        IntegerField::Value(rate) if rate < 0 => Err(RateError::Negative),
        IntegerField::Value(rate) if rate > MAX_RATE => Err(RateError::AboveMaximum),
        IntegerField::Value(_) => Ok(()),
    }
}

/// Term must be a non-negative integer. Blank means "not provided".
pub fn validate_term(value: &FieldValue) -> Result<(), TermError> {
    match value.as_integer() {
        IntegerField::NotProvided => Ok(()),
        IntegerField::Invalid => Err(TermError::Invalid),
        IntegerField::Value(years) if years < 0 => Err(TermError::Negative),
        IntegerField::Value(_) => Ok(()),
    }
}

/// Run the rate and term validators for the keys that are present.
pub fn validate_mortgage_fields(fields: &Fields) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(value) = fields.get(RATE_FIELD) {
        errors.record(RATE_FIELD, validate_rate(value));
    }
    if let Some(value) = fields.get(TERM_FIELD) {
        errors.record(TERM_FIELD, validate_term(value));
    }
    errors
}
