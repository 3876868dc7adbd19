//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer and the
//! schema wrappers that document domain types without coupling them to
//! utoipa. The document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::clients::ClientResponse;
use crate::inbound::http::mortgages::MortgageResponse;
use crate::inbound::http::schemas::{
    ClientRequestSchema, ErrorCodeSchema, ErrorSchema, MortgageRequestSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending backend API",
        description = "Client and mortgage management with identifier, contact, and term validation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::clients::list_clients,
        crate::inbound::http::clients::create_client,
        crate::inbound::http::clients::get_client,
        crate::inbound::http::clients::update_client,
        crate::inbound::http::clients::delete_client,
        crate::inbound::http::mortgages::list_mortgages,
        crate::inbound::http::mortgages::list_client_mortgages,
        crate::inbound::http::mortgages::open_mortgage,
        crate::inbound::http::mortgages::close_mortgage,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ClientResponse,
        MortgageResponse,
        ClientRequestSchema,
        MortgageRequestSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "clients", description = "Client records"),
        (name = "mortgages", description = "Mortgage products held by clients"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_mortgage_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let mortgage = schemas.get("MortgageResponse").expect("MortgageResponse schema");

        assert_object_schema_has_field(mortgage, "monthlyFee");
        assert_object_schema_has_field(mortgage, "totalFee");
    }

    #[test]
    fn openapi_documents_every_client_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/clients",
            "/api/v1/clients/{identifier}",
            "/api/v1/clients/{identifier}/mortgages",
            "/api/v1/mortgages",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
