//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ClientCommand, ClientQuery, FixtureClientCommand, FixtureClientQuery, FixtureMortgageCommand,
    FixtureMortgageQuery, MortgageCommand, MortgageQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub clients: Arc<dyn ClientCommand>,
    pub clients_query: Arc<dyn ClientQuery>,
    pub mortgages: Arc<dyn MortgageCommand>,
    pub mortgages_query: Arc<dyn MortgageQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            clients: Arc::new(FixtureClientCommand),
            clients_query: Arc::new(FixtureClientQuery),
            mortgages: Arc::new(FixtureMortgageCommand),
            mortgages_query: Arc::new(FixtureMortgageQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub clients: Arc<dyn ClientCommand>,
    pub clients_query: Arc<dyn ClientQuery>,
    pub mortgages: Arc<dyn MortgageCommand>,
    pub mortgages_query: Arc<dyn MortgageQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureClientQuery;
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     clients_query: Arc::new(FixtureClientQuery),
    ///     ..HttpStatePorts::default()
    /// });
    /// let _query = state.clients_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            clients,
            clients_query,
            mortgages,
            mortgages_query,
        } = ports;
        Self {
            clients,
            clients_query,
            mortgages,
            mortgages_query,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(HttpStatePorts::default())
    }
}
