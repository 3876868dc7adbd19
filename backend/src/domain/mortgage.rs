//! Mortgage aggregate.
//!
//! A mortgage is identified by its owner and terms. The monthly fee is
//! computed once when the mortgage is opened and stored from then on.

use crate::domain::mortgage_fields::{RATE_FIELD, TERM_FIELD, TermError};
use crate::domain::{
    Client, ClientId, FieldErrors, Fields, IntegerField, compute_monthly_fee,
    total_repayment, validate_mortgage_fields,
};

/// Whole-number TAE and term in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MortgageTerms {
    pub tae: u32,
    pub years: u32,
}

impl MortgageTerms {
    pub fn new(tae: u32, years: u32) -> Self {
        Self { tae, years }
    }

    /// Validate and read terms. Missing or blank values read as zero.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Fields, MortgageTerms};
    ///
    /// let terms = MortgageTerms::from_fields(&Fields::new().with("tae", "3"))
    ///     .expect("valid terms");
    /// assert_eq!(terms, MortgageTerms::new(3, 0));
    ///
    /// let errors = MortgageTerms::from_fields(&Fields::new().with("years", "-1"))
    ///     .expect_err("negative term");
    /// assert_eq!(errors.get("years"), Some("Years cannot be negative"));
    /// ```
    pub fn from_fields(fields: &Fields) -> Result<Self, FieldErrors> {
        let mut errors = validate_mortgage_fields(fields);
        if !errors.is_empty() {
            return Err(errors);
        }
        let tae = read_count(fields, RATE_FIELD);
        let years = read_count(fields, TERM_FIELD);
        match (tae, years) {
            (Some(tae), Some(years)) => Ok(Self { tae, years }),
            (_, None) => {
                errors.record(TERM_FIELD, Err(TermError::Invalid));
                Err(errors)
            }
            (None, Some(_)) => {
                errors.insert(RATE_FIELD, "Invalid tae");
                Err(errors)
            }
        }
    }
}

// Range checks already ran, so only overflow can fail here.
fn read_count(fields: &Fields, name: &str) -> Option<u32> {
    match fields.get(name).map(|value| value.as_integer()) {
        None | Some(IntegerField::NotProvided) => Some(0),
        Some(IntegerField::Value(value)) => u32::try_from(value).ok(),
        Some(IntegerField::Invalid) => None,
    }
}

/// Storage key: owning client plus terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MortgageKey {
    pub client: ClientId,
    pub terms: MortgageTerms,
}

impl MortgageKey {
    pub fn new(client: ClientId, terms: MortgageTerms) -> Self {
        Self { client, terms }
    }
}

/// Why a mortgage could not be opened for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OpeningError {
    #[error("Years must be greater than zero")]
    ZeroTerm,
    #[error("Client has no capital to finance")]
    MissingCapital,
}

impl OpeningError {
    /// Request field the failure is reported against.
    pub fn field(self) -> &'static str {
        match self {
            Self::ZeroTerm => TERM_FIELD,
            Self::MissingCapital => crate::domain::client_fields::CAPITAL_FIELD,
        }
    }

    /// The failure as a single-entry error map.
    pub fn into_field_errors(self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.insert(self.field(), self.to_string());
        errors
    }
}

/// A mortgage product held by a client.
#[derive(Debug, Clone, PartialEq)]
pub struct Mortgage {
    key: MortgageKey,
    monthly_fee: f64,
}

impl Mortgage {
    /// Rehydrate a stored mortgage.
    pub fn from_parts(key: MortgageKey, monthly_fee: f64) -> Self {
        Self { key, monthly_fee }
    }

    /// Open a mortgage that finances the client's capital.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Client, ClientId, Mortgage, MortgageTerms};
    ///
    /// let client = Client::new(ClientId::parse("12345678Z").expect("valid"))
    ///     .with_capital(120_000);
    /// let mortgage = Mortgage::open(&client, MortgageTerms::new(0, 10)).expect("opens");
    /// assert_eq!(mortgage.monthly_fee(), 1_000.0);
    /// assert_eq!(mortgage.total_fee(), 120_000.0);
    /// ```
    pub fn open(client: &Client, terms: MortgageTerms) -> Result<Self, OpeningError> {
        if terms.years == 0 {
            return Err(OpeningError::ZeroTerm);
        }
        let principal = client.capital().ok_or(OpeningError::MissingCapital)?;
        let monthly_fee =
            compute_monthly_fee(principal, i64::from(terms.tae), i64::from(terms.years));
        Ok(Self {
            key: MortgageKey::new(client.id().clone(), terms),
            monthly_fee,
        })
    }

    pub fn key(&self) -> &MortgageKey {
        &self.key
    }

    pub fn client(&self) -> &ClientId {
        &self.key.client
    }

    pub fn terms(&self) -> MortgageTerms {
        self.key.terms
    }

    pub fn monthly_fee(&self) -> f64 {
        self.monthly_fee
    }

    /// Total repaid over the term.
    pub fn total_fee(&self) -> f64 {
        total_repayment(self.monthly_fee, i64::from(self.key.terms.years))
    }
}
