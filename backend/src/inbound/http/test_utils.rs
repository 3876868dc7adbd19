//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build an app serving the API routes over `ports`, wrapped in [`Trace`].
pub fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}
