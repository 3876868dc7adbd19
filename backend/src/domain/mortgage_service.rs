//! Mortgage domain service.
//!
//! Opening a mortgage validates the terms, resolves the owning client, and
//! computes the monthly fee from the client's capital. The repository keeps
//! the first mortgage stored under a key, so reopening the same terms returns
//! the existing product.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::client_service::{map_client_error, map_mortgage_error};
use crate::domain::ports::{ClientRepository, MortgageCommand, MortgageQuery, MortgageRepository};
use crate::domain::{
    Client, ClientId, Error, Fields, Mortgage, MortgageKey, MortgageTerms, client_not_found,
};

/// Mortgage service implementing the mortgage driving ports.
#[derive(Clone)]
pub struct MortgageService<C, M> {
    clients: Arc<C>,
    mortgages: Arc<M>,
}

impl<C, M> MortgageService<C, M> {
    /// Create a service over the given repositories.
    pub fn new(clients: Arc<C>, mortgages: Arc<M>) -> Self {
        Self { clients, mortgages }
    }
}

impl<C, M> MortgageService<C, M>
where
    C: ClientRepository,
    M: MortgageRepository,
{
    fn read_terms(fields: &Fields) -> Result<MortgageTerms, Error> {
        MortgageTerms::from_fields(fields).map_err(|errors| errors.into_error())
    }

    async fn find_owner(&self, id: &ClientId) -> Result<Client, Error> {
        self.clients
            .find(id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| client_not_found(id))
    }
}

#[async_trait]
impl<C, M> MortgageCommand for MortgageService<C, M>
where
    C: ClientRepository,
    M: MortgageRepository,
{
    async fn open(&self, client: &ClientId, fields: Fields) -> Result<Mortgage, Error> {
        let terms = Self::read_terms(&fields)?;
        let owner = self.find_owner(client).await?;
        let candidate = Mortgage::open(&owner, terms)
            .map_err(|err| err.into_field_errors().into_error())?;

        let stored = self
            .mortgages
            .insert_or_get(&candidate)
            .await
            .map_err(map_mortgage_error)?;
        info!(
            identifier = %client,
            tae = terms.tae,
            years = terms.years,
            monthly_fee = stored.monthly_fee(),
            "mortgage opened"
        );
        Ok(stored)
    }

    async fn close(&self, client: &ClientId, fields: Fields) -> Result<Mortgage, Error> {
        let terms = Self::read_terms(&fields)?;
        self.find_owner(client).await?;

        let key = MortgageKey::new(client.clone(), terms);
        let removed = self
            .mortgages
            .delete(&key)
            .await
            .map_err(map_mortgage_error)?
            .ok_or_else(|| Error::not_found("No mortgage associated with the given parameters"))?;
        info!(identifier = %client, tae = terms.tae, years = terms.years, "mortgage closed");
        Ok(removed)
    }
}

#[async_trait]
impl<C, M> MortgageQuery for MortgageService<C, M>
where
    C: ClientRepository,
    M: MortgageRepository,
{
    async fn list(&self) -> Result<Vec<Mortgage>, Error> {
        self.mortgages
            .list()
            .await
            .map_err(map_mortgage_error)
    }

    async fn list_for_client(&self, client: &ClientId) -> Result<Vec<Mortgage>, Error> {
        self.find_owner(client).await?;
        self.mortgages
            .list_for_client(client)
            .await
            .map_err(map_mortgage_error)
    }
}

#[cfg(test)]
#[path = "mortgage_service_tests.rs"]
mod tests;
