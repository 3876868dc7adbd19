//! Port for mortgage persistence.

use async_trait::async_trait;

use crate::domain::{ClientId, Mortgage, MortgageKey};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mortgage repository adapters.
    pub enum MortgageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "mortgage repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "mortgage repository query failed: {message}",
        /// The owning client is not stored.
        OwnerMissing { identifier: String } => "client {identifier} does not exist",
    }
}

/// Storage for [`Mortgage`] records keyed by [`MortgageKey`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MortgageRepository: Send + Sync {
    /// Every stored mortgage, ordered by key.
    async fn list(&self) -> Result<Vec<Mortgage>, MortgageRepositoryError>;

    /// Mortgages owned by one client, ordered by terms.
    async fn list_for_client(
        &self,
        client: &ClientId,
    ) -> Result<Vec<Mortgage>, MortgageRepositoryError>;

    /// Store `mortgage` unless one with the same key exists.
    ///
    /// Returns the stored record: the argument on first insert, the earlier
    /// record otherwise. Fails with [`MortgageRepositoryError::OwnerMissing`]
    /// when the owner was deleted.
    async fn insert_or_get(&self, mortgage: &Mortgage) -> Result<Mortgage, MortgageRepositoryError>;

    /// Remove a mortgage; `None` when absent.
    async fn delete(&self, key: &MortgageKey) -> Result<Option<Mortgage>, MortgageRepositoryError>;
}

/// Fixture repository that echoes inserts and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMortgageRepository;

#[async_trait]
impl MortgageRepository for FixtureMortgageRepository {
    async fn list(&self) -> Result<Vec<Mortgage>, MortgageRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_client(
        &self,
        _client: &ClientId,
    ) -> Result<Vec<Mortgage>, MortgageRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_or_get(&self, mortgage: &Mortgage) -> Result<Mortgage, MortgageRepositoryError> {
        Ok(mortgage.clone())
    }

    async fn delete(&self, _key: &MortgageKey) -> Result<Option<Mortgage>, MortgageRepositoryError> {
        Ok(None)
    }
}
