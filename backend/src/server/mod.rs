//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{EmailChecks, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::configure_api;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, email_checks = ?config.email_checks, "lending backend listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    fn offline_state() -> web::Data<HttpState> {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into())
            .with_email_checks(EmailChecks::SyntaxOnly);
        build_http_state(&config)
    }

    #[actix_web::test]
    async fn app_serves_api_and_probes() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = test::init_service(build_app(health, offline_state())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));

        let req = test::TestRequest::post()
            .uri("/api/v1/clients")
            .set_json(json!({"identifier": "12345678Z", "email": "ada@example.com"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["identifier"], "12345678Z");
    }
}
