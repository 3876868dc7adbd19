//! Client aggregate.
//!
//! A client is keyed by its [`ClientId`] and owns zero or more mortgages.
//! Instances are built from field sets that already passed
//! [`ClientFieldsValidator::validate`](crate::domain::ClientFieldsValidator).

use crate::domain::client_fields::{CAPITAL_FIELD, EMAIL_FIELD, IDENTIFIER_FIELD, NAME_FIELD};
use crate::domain::{ClientId, FieldValue, Fields, IdentifierError, IntegerField, Mortgage};

/// A lending client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: Option<String>,
    email: Option<String>,
    capital: Option<i64>,
}

impl Client {
    /// Create a client with only an identifier.
    pub fn new(id: ClientId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            capital: None,
        }
    }

    /// Build a client from validated fields.
    ///
    /// The identifier is mandatory; other fields default to "not provided".
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Client, Fields};
    ///
    /// let fields = Fields::new()
    ///     .with("identifier", "12345678z")
    ///     .with("name", "Ada")
    ///     .with("capital", 150_000_i64);
    /// let client = Client::from_fields(&fields).expect("valid client");
    /// assert_eq!(client.id().to_string(), "12345678Z");
    /// assert_eq!(client.capital(), Some(150000));
    /// assert_eq!(client.email(), None);
    /// ```
    pub fn from_fields(fields: &Fields) -> Result<Self, IdentifierError> {
        let raw_id = fields
            .get(IDENTIFIER_FIELD)
            .and_then(FieldValue::as_text)
            .ok_or(IdentifierError::Missing)?;
        let mut client = Self::new(ClientId::parse(raw_id)?);
        client.apply(ClientChanges::from_fields(fields));
        Ok(client)
    }

    /// Builder-style setter for the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style setter for the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder-style setter for the capital.
    #[must_use]
    pub fn with_capital(mut self, capital: i64) -> Self {
        self.capital = Some(capital);
        self
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn capital(&self) -> Option<i64> {
        self.capital
    }

    /// Apply a partial update. The identifier never changes.
    pub fn apply(&mut self, changes: ClientChanges) {
        let ClientChanges {
            name,
            email,
            capital,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(capital) = capital {
            self.capital = capital;
        }
    }
}

/// Partial update of a client's mutable fields.
///
/// The outer `Option` says whether the key was sent; the inner one is the new
/// value, where `None` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientChanges {
    pub name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub capital: Option<Option<i64>>,
}

impl ClientChanges {
    /// Read the mutable fields present in a validated field set.
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: fields.get(NAME_FIELD).map(text_value),
            email: fields.get(EMAIL_FIELD).map(text_value),
            capital: fields.get(CAPITAL_FIELD).map(integer_value),
        }
    }

    /// Whether no mutable field was sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.capital.is_none()
    }
}

fn text_value(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        return None;
    }
    value.as_text().map(str::to_owned)
}

fn integer_value(value: &FieldValue) -> Option<i64> {
    match value.as_integer() {
        IntegerField::Value(integer) => Some(integer),
        IntegerField::NotProvided | IntegerField::Invalid => None,
    }
}

/// A client together with the mortgages it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientPortfolio {
    pub client: Client,
    pub mortgages: Vec<Mortgage>,
}

impl ClientPortfolio {
    pub fn new(client: Client, mortgages: Vec<Mortgage>) -> Self {
        Self { client, mortgages }
    }
}
