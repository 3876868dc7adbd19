//! Client field validators and their aggregation.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{
    EmailError, EmailVerifier, FieldErrors, FieldValue, Fields, IdentifierError, IntegerField,
    validate_identifier,
};

/// Request key carrying the client name.
pub const NAME_FIELD: &str = "name";
/// Request key carrying the client identifier.
pub const IDENTIFIER_FIELD: &str = "identifier";
/// Request key carrying the client email.
pub const EMAIL_FIELD: &str = "email";
/// Request key carrying the client capital.
pub const CAPITAL_FIELD: &str = "capital";

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z\s]+$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

/// Name validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("El nombre solo puede contener caracteres y espacios")]
    InvalidCharacters,
}

/// Capital validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapitalError {
    #[error("Invalid capital")]
    Invalid,
    #[error("Capital cannot be negative")]
    Negative,
}

/// Names may hold ASCII letters and whitespace only. Blank means "not
/// provided".
pub fn validate_name(value: &FieldValue) -> Result<(), NameError> {
    if value.is_blank() {
        return Ok(());
    }
    match value.as_text() {
        Some(text) if name_regex().is_match(text) => Ok(()),
        _ => Err(NameError::InvalidCharacters),
    }
}

/// Capital must be a non-negative integer. Blank means "not provided".
///
/// # Examples
/// ```
/// use backend::domain::{CapitalError, FieldValue, validate_capital};
///
/// assert_eq!(validate_capital(&FieldValue::from("-5")), Err(CapitalError::Negative));
/// assert_eq!(validate_capital(&FieldValue::from("abc")), Err(CapitalError::Invalid));
/// assert!(validate_capital(&FieldValue::from("")).is_ok());
/// ```
pub fn validate_capital(value: &FieldValue) -> Result<(), CapitalError> {
    match value.as_integer() {
        IntegerField::NotProvided => Ok(()),
        IntegerField::Invalid => Err(CapitalError::Invalid),
        IntegerField::Value(capital) if capital < 0 => Err(CapitalError::Negative),
        IntegerField::Value(_) => Ok(()),
    }
}

/// Identifier field check. Null means "not provided"; non-text values never
/// match a format.
pub fn validate_identifier_field(value: &FieldValue) -> Result<(), IdentifierError> {
    match value {
        FieldValue::Null => Ok(()),
        FieldValue::Text(text) => validate_identifier(text),
        FieldValue::Integer(number) => {
            Err(IdentifierError::Unrecognised(number.to_string()))
        }
        FieldValue::Other(other) => Err(IdentifierError::Unrecognised(other.to_string())),
    }
}

/// Validates the fields of a client payload.
///
/// Holds the email verifier, which is the only validator that performs I/O.
#[derive(Clone)]
pub struct ClientFieldsValidator {
    email: EmailVerifier,
}

impl ClientFieldsValidator {
    /// Build a validator around an email verifier.
    pub fn new(email: EmailVerifier) -> Self {
        Self { email }
    }

    /// Email field check. Null means "not provided".
    pub async fn validate_email(&self, value: &FieldValue) -> Result<(), EmailError> {
        match value {
            FieldValue::Null => Ok(()),
            FieldValue::Text(text) => self.email.verify(text).await,
            FieldValue::Integer(_) | FieldValue::Other(_) => Err(EmailError::BadlyFormatted),
        }
    }

    /// Run every validator whose key is present and collect the failures.
    ///
    /// Absent keys are skipped; present-but-empty values pass.
    pub async fn validate(&self, fields: &Fields) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(value) = fields.get(NAME_FIELD) {
            errors.record(NAME_FIELD, validate_name(value));
        }
        if let Some(value) = fields.get(IDENTIFIER_FIELD) {
            errors.record(IDENTIFIER_FIELD, validate_identifier_field(value));
        }
        if let Some(value) = fields.get(EMAIL_FIELD) {
            errors.record(EMAIL_FIELD, self.validate_email(value).await);
        }
        if let Some(value) = fields.get(CAPITAL_FIELD) {
            errors.record(CAPITAL_FIELD, validate_capital(value));
        }
        if !errors.is_empty() {
            debug!(failures = errors.len(), "client fields rejected");
        }
        errors
    }
}
