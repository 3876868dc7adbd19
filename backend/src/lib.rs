//! Client and mortgage lending backend.
//!
//! The [`domain`] validates and prices lending data behind ports; the
//! [`inbound`] and [`outbound`] adapters expose it over HTTP and connect it
//! to storage, DNS, and SMTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
