//! Driving port for mortgage reads.

use async_trait::async_trait;

use crate::domain::{ClientId, Error, Mortgage};

/// Use-case port for listing mortgages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MortgageQuery: Send + Sync {
    /// Every mortgage across all clients.
    async fn list(&self) -> Result<Vec<Mortgage>, Error>;

    /// The mortgages one client holds; `not_found` when the client is absent.
    async fn list_for_client(&self, client: &ClientId) -> Result<Vec<Mortgage>, Error>;
}

/// Fixture query over an empty mortgage book.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMortgageQuery;

#[async_trait]
impl MortgageQuery for FixtureMortgageQuery {
    async fn list(&self) -> Result<Vec<Mortgage>, Error> {
        Ok(Vec::new())
    }

    async fn list_for_client(&self, _client: &ClientId) -> Result<Vec<Mortgage>, Error> {
        Ok(Vec::new())
    }
}
