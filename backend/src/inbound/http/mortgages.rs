//! Mortgage HTTP handlers.
//!
//! ```text
//! GET    /api/v1/mortgages
//! GET    /api/v1/clients/{identifier}/mortgages
//! POST   /api/v1/clients/{identifier}/mortgages
//! DELETE /api/v1/clients/{identifier}/mortgages
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{Mortgage, parse_client_id};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MortgageRequestSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::mortgage_fields;

/// Response payload for a mortgage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResponse {
    /// Owning client's identifier, uppercase.
    #[schema(example = "12345678Z")]
    pub identifier: String,
    #[schema(example = 3)]
    pub tae: u32,
    #[schema(example = 20)]
    pub years: u32,
    #[schema(example = 554.6)]
    pub monthly_fee: f64,
    #[schema(example = 133103.34)]
    pub total_fee: f64,
}

impl From<&Mortgage> for MortgageResponse {
    fn from(mortgage: &Mortgage) -> Self {
        let terms = mortgage.terms();
        Self {
            identifier: mortgage.client().to_string(),
            tae: terms.tae,
            years: terms.years,
            monthly_fee: mortgage.monthly_fee(),
            total_fee: mortgage.total_fee(),
        }
    }
}

impl From<Mortgage> for MortgageResponse {
    fn from(mortgage: Mortgage) -> Self {
        Self::from(&mortgage)
    }
}

fn to_responses(mortgages: Vec<Mortgage>) -> Vec<MortgageResponse> {
    mortgages.into_iter().map(MortgageResponse::from).collect()
}

/// List every mortgage.
#[utoipa::path(
    get,
    path = "/api/v1/mortgages",
    responses(
        (status = 200, description = "All mortgages", body = [MortgageResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["mortgages"],
    operation_id = "listMortgages"
)]
#[get("/mortgages")]
pub async fn list_mortgages(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MortgageResponse>>> {
    let mortgages = state.mortgages_query.list().await?;
    Ok(web::Json(to_responses(mortgages)))
}

/// List the mortgages held by one client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/{identifier}/mortgages",
    params(("identifier" = String, Path, description = "DNI, NIE, or CIF")),
    responses(
        (status = 200, description = "Client mortgages", body = [MortgageResponse]),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Unknown client", body = ErrorSchema)
    ),
    tags = ["mortgages"],
    operation_id = "listClientMortgages"
)]
#[get("/clients/{identifier}/mortgages")]
pub async fn list_client_mortgages(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MortgageResponse>>> {
    let id = parse_client_id(&path.into_inner())?;
    let mortgages = state.mortgages_query.list_for_client(&id).await?;
    Ok(web::Json(to_responses(mortgages)))
}

/// Open a mortgage financing the client's capital.
///
/// An existing mortgage with the same terms is returned unchanged.
#[utoipa::path(
    post,
    path = "/api/v1/clients/{identifier}/mortgages",
    params(("identifier" = String, Path, description = "DNI, NIE, or CIF")),
    request_body = MortgageRequestSchema,
    responses(
        (status = 200, description = "Opened or existing mortgage", body = MortgageResponse),
        (status = 400, description = "Invalid terms or client without capital", body = ErrorSchema),
        (status = 404, description = "Unknown client", body = ErrorSchema)
    ),
    tags = ["mortgages"],
    operation_id = "openMortgage"
)]
#[post("/clients/{identifier}/mortgages")]
pub async fn open_mortgage(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<MortgageResponse>> {
    let id = parse_client_id(&path.into_inner())?;
    let mortgage = state
        .mortgages
        .open(&id, mortgage_fields(payload.into_inner()))
        .await?;
    Ok(web::Json(MortgageResponse::from(mortgage)))
}

/// Close the client's mortgage with the given terms.
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{identifier}/mortgages",
    params(("identifier" = String, Path, description = "DNI, NIE, or CIF")),
    request_body = MortgageRequestSchema,
    responses(
        (status = 200, description = "Removed mortgage", body = MortgageResponse),
        (status = 400, description = "Invalid terms", body = ErrorSchema),
        (status = 404, description = "Unknown client or mortgage", body = ErrorSchema)
    ),
    tags = ["mortgages"],
    operation_id = "closeMortgage"
)]
#[delete("/clients/{identifier}/mortgages")]
pub async fn close_mortgage(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<MortgageResponse>> {
    let id = parse_client_id(&path.into_inner())?;
    let mortgage = state
        .mortgages
        .close(&id, mortgage_fields(payload.into_inner()))
        .await?;
    Ok(web::Json(MortgageResponse::from(mortgage)))
}
