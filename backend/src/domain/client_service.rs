//! Client domain service.
//!
//! Implements [`ClientCommand`] and [`ClientQuery`] over the client and
//! mortgage repositories. Field validation (including the email deliverability
//! check) runs before any repository call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::client_fields::IDENTIFIER_FIELD;
use crate::domain::ports::{
    ClientCommand, ClientQuery, ClientRepository, ClientRepositoryError, MortgageRepository,
    MortgageRepositoryError,
};
use crate::domain::{
    Client, ClientChanges, ClientFieldsValidator, ClientId, ClientPortfolio, Error, FieldErrors,
    Fields, client_not_found,
};

pub(crate) fn map_client_error(error: ClientRepositoryError) -> Error {
    match error {
        ClientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("client repository unavailable: {message}"))
        }
        ClientRepositoryError::Query { message } => {
            Error::internal(format!("client repository error: {message}"))
        }
        ClientRepositoryError::Duplicate { identifier } => {
            Error::conflict(format!("Client under '{identifier}' already exists"))
        }
        ClientRepositoryError::Missing { identifier } => Error::not_found(format!(
            "No client associated with the identification {identifier} given"
        )),
    }
}

pub(crate) fn map_mortgage_error(error: MortgageRepositoryError) -> Error {
    match error {
        MortgageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("mortgage repository unavailable: {message}"))
        }
        MortgageRepositoryError::Query { message } => {
            Error::internal(format!("mortgage repository error: {message}"))
        }
        MortgageRepositoryError::OwnerMissing { identifier } => Error::not_found(format!(
            "No client associated with the identification {identifier} given"
        )),
    }
}

/// Client service implementing the client driving ports.
#[derive(Clone)]
pub struct ClientService<C, M> {
    clients: Arc<C>,
    mortgages: Arc<M>,
    validator: ClientFieldsValidator,
}

impl<C, M> ClientService<C, M> {
    /// Create a service over the given repositories and validator.
    pub fn new(clients: Arc<C>, mortgages: Arc<M>, validator: ClientFieldsValidator) -> Self {
        Self {
            clients,
            mortgages,
            validator,
        }
    }
}

impl<C, M> ClientService<C, M>
where
    C: ClientRepository,
    M: MortgageRepository,
{
    async fn validate(&self, fields: &Fields) -> Result<(), Error> {
        self.validator.validate(fields).await.into_result()
    }

    async fn find_existing(&self, id: &ClientId) -> Result<Client, Error> {
        self.clients
            .find(id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| client_not_found(id))
    }

    async fn portfolio(&self, client: Client) -> Result<ClientPortfolio, Error> {
        let mortgages = self
            .mortgages
            .list_for_client(client.id())
            .await
            .map_err(map_mortgage_error)?;
        Ok(ClientPortfolio::new(client, mortgages))
    }
}

#[async_trait]
impl<C, M> ClientCommand for ClientService<C, M>
where
    C: ClientRepository,
    M: MortgageRepository,
{
    async fn create(&self, fields: Fields) -> Result<ClientPortfolio, Error> {
        self.validate(&fields).await?;
        let client = Client::from_fields(&fields).map_err(|err| {
            let mut errors = FieldErrors::new();
            errors.insert(IDENTIFIER_FIELD, err.to_string());
            errors.into_error()
        })?;

        self.clients
            .insert(&client)
            .await
            .map_err(map_client_error)?;
        info!(identifier = %client.id(), "client created");
        Ok(ClientPortfolio::new(client, Vec::new()))
    }

    async fn update(&self, id: &ClientId, mut fields: Fields) -> Result<ClientPortfolio, Error> {
        fields.remove(IDENTIFIER_FIELD);
        self.validate(&fields).await?;

        let mut client = self.find_existing(id).await?;
        let changes = ClientChanges::from_fields(&fields);
        if !changes.is_empty() {
            client.apply(changes);
            self.clients
                .update(&client)
                .await
                .map_err(map_client_error)?;
        }
        info!(identifier = %id, "client updated");
        self.portfolio(client).await
    }

    async fn delete(&self, id: &ClientId) -> Result<ClientPortfolio, Error> {
        let removed = self
            .clients
            .delete(id)
            .await
            .map_err(map_client_error)?
            .ok_or_else(|| client_not_found(id))?;
        info!(
            identifier = %id,
            mortgages = removed.mortgages.len(),
            "client deleted"
        );
        Ok(removed)
    }
}

#[async_trait]
impl<C, M> ClientQuery for ClientService<C, M>
where
    C: ClientRepository,
    M: MortgageRepository,
{
    async fn list(&self) -> Result<Vec<ClientPortfolio>, Error> {
        let clients = self.clients.list().await.map_err(map_client_error)?;
        let mut portfolios = Vec::with_capacity(clients.len());
        for client in clients {
            portfolios.push(self.portfolio(client).await?);
        }
        Ok(portfolios)
    }

    async fn get(&self, id: &ClientId) -> Result<ClientPortfolio, Error> {
        let client = self.find_existing(id).await?;
        self.portfolio(client).await
    }
}

#[cfg(test)]
#[path = "client_service_tests.rs"]
mod tests;
