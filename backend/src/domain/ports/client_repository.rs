//! Port for client persistence.
//!
//! Deleting a client removes the mortgages it owns in the same operation, so
//! adapters that store both aggregates must keep them consistent.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, ClientPortfolio};

use super::define_port_error;

define_port_error! {
    /// Errors raised by client repository adapters.
    pub enum ClientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "client repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "client repository query failed: {message}",
        /// A client with the same identifier is already stored.
        Duplicate { identifier: String } => "client {identifier} already exists",
        /// The client to update is not stored.
        Missing { identifier: String } => "client {identifier} does not exist",
    }
}

/// Storage for [`Client`] records keyed by [`ClientId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Every stored client, ordered by identifier.
    async fn list(&self) -> Result<Vec<Client>, ClientRepositoryError>;

    /// Fetch a client; `None` when absent.
    async fn find(&self, id: &ClientId) -> Result<Option<Client>, ClientRepositoryError>;

    /// Store a new client.
    ///
    /// Fails with [`ClientRepositoryError::Duplicate`] when the identifier is
    /// taken. The check and the write are atomic.
    async fn insert(&self, client: &Client) -> Result<(), ClientRepositoryError>;

    /// Replace a stored client.
    ///
    /// Fails with [`ClientRepositoryError::Missing`] when it was removed in
    /// the meantime.
    async fn update(&self, client: &Client) -> Result<(), ClientRepositoryError>;

    /// Remove a client together with its mortgages and return both.
    async fn delete(&self, id: &ClientId)
    -> Result<Option<ClientPortfolio>, ClientRepositoryError>;
}
