//! Client HTTP handlers.
//!
//! ```text
//! GET    /api/v1/clients
//! POST   /api/v1/clients
//! GET    /api/v1/clients/{identifier}
//! PATCH  /api/v1/clients/{identifier}
//! DELETE /api/v1/clients/{identifier}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{ClientPortfolio, parse_client_id};
use crate::inbound::http::ApiResult;
use crate::inbound::http::mortgages::MortgageResponse;
use crate::inbound::http::schemas::{ClientRequestSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::client_fields;

/// Response payload for a client and the mortgages it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    /// Identifier in display form (uppercase).
    #[schema(example = "12345678Z")]
    pub identifier: String,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = 150000)]
    pub capital: Option<i64>,
    pub mortgages: Vec<MortgageResponse>,
}

impl From<ClientPortfolio> for ClientResponse {
    fn from(portfolio: ClientPortfolio) -> Self {
        let ClientPortfolio { client, mortgages } = portfolio;
        Self {
            identifier: client.id().to_string(),
            name: client.name().map(str::to_owned),
            email: client.email().map(str::to_owned),
            capital: client.capital(),
            mortgages: mortgages.iter().map(MortgageResponse::from).collect(),
        }
    }
}

/// List every client with its mortgages.
#[utoipa::path(
    get,
    path = "/api/v1/clients",
    responses(
        (status = 200, description = "All clients", body = [ClientResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "listClients"
)]
#[get("/clients")]
pub async fn list_clients(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ClientResponse>>> {
    let clients = state.clients_query.list().await?;
    Ok(web::Json(
        clients.into_iter().map(ClientResponse::from).collect(),
    ))
}

/// Validate and store a new client.
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = ClientRequestSchema,
    responses(
        (status = 201, description = "Created client", body = ClientResponse),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 409, description = "Identifier already registered", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "createClient"
)]
#[post("/clients")]
pub async fn create_client(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let created = state
        .clients
        .create(client_fields(payload.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(ClientResponse::from(created)))
}

/// Fetch one client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/{identifier}",
    params(("identifier" = String, Path, description = "DNI, NIE, or CIF")),
    responses(
        (status = 200, description = "Client", body = ClientResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Unknown client", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "getClient"
)]
#[get("/clients/{identifier}")]
pub async fn get_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClientResponse>> {
    let id = parse_client_id(&path.into_inner())?;
    let portfolio = state.clients_query.get(&id).await?;
    Ok(web::Json(ClientResponse::from(portfolio)))
}

/// Update the fields sent for an existing client.
///
/// The path identifier wins over any identifier in the body.
#[utoipa::path(
    patch,
    path = "/api/v1/clients/{identifier}",
    params(("identifier" = String, Path, description = "DNI, NIE, or CIF")),
    request_body = ClientRequestSchema,
    responses(
        (status = 200, description = "Updated client", body = ClientResponse),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 404, description = "Unknown client", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "updateClient"
)]
#[patch("/clients/{identifier}")]
pub async fn update_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<ClientResponse>> {
    let id = parse_client_id(&path.into_inner())?;
    let updated = state
        .clients
        .update(&id, client_fields(payload.into_inner()))
        .await?;
    Ok(web::Json(ClientResponse::from(updated)))
}

/// Remove a client together with its mortgages.
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{identifier}",
    params(("identifier" = String, Path, description = "DNI, NIE, or CIF")),
    responses(
        (status = 200, description = "Removed client and mortgages", body = ClientResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Unknown client", body = ErrorSchema)
    ),
    tags = ["clients"],
    operation_id = "deleteClient"
)]
#[delete("/clients/{identifier}")]
pub async fn delete_client(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClientResponse>> {
    let id = parse_client_id(&path.into_inner())?;
    let removed = state.clients.delete(&id).await?;
    Ok(web::Json(ClientResponse::from(removed)))
}

#[cfg(test)]
#[path = "clients_tests.rs"]
mod tests;
