//! Domain primitives, validators, and services.
//!
//! Purpose: validate client and mortgage input, compute mortgage fees, and
//! coordinate persistence through the ports in [`ports`]. Nothing here
//! depends on actix or on a concrete storage or network adapter.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Client / Mortgage — lending aggregates.
//! - validate_identifier, EmailVerifier, validate_capital, validate_rate,
//!   validate_term — per-field validators.
//! - ClientFieldsValidator, validate_mortgage_fields — aggregated validation.
//! - ClientService / MortgageService — driving port implementations.

pub mod amortization;
pub mod client;
pub mod client_fields;
mod client_service;
pub mod email;
pub mod error;
pub mod fields;
pub mod identifier;
pub mod mortgage;
pub mod mortgage_fields;
mod mortgage_service;
pub mod ports;
pub mod trace_id;

pub use self::amortization::{compute_monthly_fee, total_repayment};
pub use self::client::{Client, ClientChanges, ClientPortfolio};
pub use self::client_fields::{
    CapitalError, ClientFieldsValidator, NameError, validate_capital, validate_identifier_field,
    validate_name,
};
pub use self::client_service::ClientService;
pub use self::email::{DEFAULT_PROBE_TIMEOUT, EmailError, EmailVerifier, validate_email_syntax};
pub use self::error::{Error, ErrorCode};
pub use self::fields::{FieldErrors, FieldValue, Fields, IntegerField};
pub use self::identifier::{
    ClientId, IdentifierError, IdentifierKind, cif_end_digit, dni_control_letter,
    validate_identifier,
};
pub use self::mortgage::{Mortgage, MortgageKey, MortgageTerms, OpeningError};
pub use self::mortgage_fields::{
    RateError, TermError, validate_mortgage_fields, validate_rate, validate_term,
};
pub use self::mortgage_service::MortgageService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

/// Parse a client identifier taken from a request path.
///
/// Failures are reported as `invalid_request` with the message under
/// `details.fields.identifier`.
pub fn parse_client_id(raw: &str) -> Result<ClientId, Error> {
    ClientId::parse(raw).map_err(|error| {
        let mut errors = FieldErrors::new();
        errors.insert(client_fields::IDENTIFIER_FIELD, error.to_string());
        errors.into_error()
    })
}

/// Not-found error for a client identifier.
pub fn client_not_found(id: &ClientId) -> Error {
    Error::not_found(format!(
        "No client associated with the identification {id} given"
    ))
}
