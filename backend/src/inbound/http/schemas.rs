//! OpenAPI schema definitions for domain types and loosely typed bodies.
//!
//! Domain types stay framework agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their JSON shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with an existing resource.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency required to serve the request is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Validation failures list per-field messages under `details.fields`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "request fields failed validation")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, e.g. `{"fields": {"capital": "Invalid capital"}}`.
    details: Option<serde_json::Value>,
}

/// Body accepted when creating or updating a client.
///
/// Values may be strings or numbers; blank strings and `null` clear a field
/// on update. `dni` is accepted as an alias of `identifier`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ClientRequestSchema {
    /// DNI, NIE, or CIF. Required on create, ignored on update.
    #[schema(example = "12345678Z")]
    identifier: Option<String>,
    /// Letters and spaces only.
    #[schema(example = "Ada Lovelace")]
    name: Option<String>,
    #[schema(example = "ada@example.com")]
    email: Option<String>,
    /// Non-negative whole amount.
    #[schema(value_type = Option<i64>, example = 150000)]
    capital: Option<serde_json::Value>,
}

/// Body accepted when opening or closing a mortgage.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MortgageRequestSchema {
    /// Annual rate in whole percent, 0 to 100. Missing reads as 0.
    #[schema(value_type = Option<i64>, example = 3)]
    tae: Option<serde_json::Value>,
    /// Term in years. Missing reads as 0, which is rejected on open.
    #[schema(value_type = Option<i64>, example = 20)]
    years: Option<serde_json::Value>,
}
