//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod clients;
pub mod error;
pub mod health;
pub mod mortgages;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;

pub use error::ApiResult;

/// Register the client and mortgage routes on a `/api/v1` scope.
///
/// Also installs the JSON body configuration so extraction failures use the
/// domain error payload.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(clients::list_clients)
        .service(clients::create_client)
        .service(clients::get_client)
        .service(clients::update_client)
        .service(clients::delete_client)
        .service(mortgages::list_mortgages)
        .service(mortgages::list_client_mortgages)
        .service(mortgages::open_mortgage)
        .service(mortgages::close_mortgage);
}
