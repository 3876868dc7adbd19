//! Driving port for client mutations.
//!
//! Inbound adapters pass raw request [`Fields`]; implementations validate
//! them before touching storage.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, ClientPortfolio, Error, Fields};

/// Use-case port for creating, updating, and deleting clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientCommand: Send + Sync {
    /// Validate `fields` and store a new client.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when a field fails validation or the identifier is
    ///   missing.
    /// - `conflict` when the identifier is taken.
    async fn create(&self, fields: Fields) -> Result<ClientPortfolio, Error>;

    /// Validate the sent fields and apply them to an existing client.
    ///
    /// An identifier in `fields` is ignored; `id` wins.
    async fn update(&self, id: &ClientId, fields: Fields) -> Result<ClientPortfolio, Error>;

    /// Remove a client and its mortgages, returning what was removed.
    async fn delete(&self, id: &ClientId) -> Result<ClientPortfolio, Error>;
}

/// Fixture command that builds clients without validating or storing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientCommand;

#[async_trait]
impl ClientCommand for FixtureClientCommand {
    async fn create(&self, fields: Fields) -> Result<ClientPortfolio, Error> {
        let client = Client::from_fields(&fields)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(ClientPortfolio::new(client, Vec::new()))
    }

    async fn update(&self, id: &ClientId, _fields: Fields) -> Result<ClientPortfolio, Error> {
        Ok(ClientPortfolio::new(Client::new(id.clone()), Vec::new()))
    }

    async fn delete(&self, id: &ClientId) -> Result<ClientPortfolio, Error> {
        Ok(ClientPortfolio::new(Client::new(id.clone()), Vec::new()))
    }
}
