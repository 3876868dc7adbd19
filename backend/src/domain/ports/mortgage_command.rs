//! Driving port for mortgage mutations.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, Error, Fields, Mortgage, MortgageTerms};

/// Use-case port for opening and closing a client's mortgages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MortgageCommand: Send + Sync {
    /// Open a mortgage with the terms in `fields` for a client.
    ///
    /// When the client already holds a mortgage with the same terms, that
    /// mortgage is returned unchanged.
    ///
    /// # Errors
    ///
    /// - `invalid_request` for invalid terms, a zero term, or a client
    ///   without capital.
    /// - `not_found` when the client is absent.
    async fn open(&self, client: &ClientId, fields: Fields) -> Result<Mortgage, Error>;

    /// Remove the client's mortgage with the terms in `fields`.
    async fn close(&self, client: &ClientId, fields: Fields) -> Result<Mortgage, Error>;
}

/// Fixture command that opens mortgages on a zero principal.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMortgageCommand;

impl FixtureMortgageCommand {
    fn build(client: &ClientId, fields: &Fields) -> Result<Mortgage, Error> {
        let terms = MortgageTerms::from_fields(fields).map_err(|errors| errors.into_error())?;
        let owner = Client::new(client.clone()).with_capital(0);
        Mortgage::open(&owner, terms).map_err(|err| err.into_field_errors().into_error())
    }
}

#[async_trait]
impl MortgageCommand for FixtureMortgageCommand {
    async fn open(&self, client: &ClientId, fields: Fields) -> Result<Mortgage, Error> {
        Self::build(client, &fields)
    }

    async fn close(&self, client: &ClientId, fields: Fields) -> Result<Mortgage, Error> {
        Self::build(client, &fields)
    }
}
