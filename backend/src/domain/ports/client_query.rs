//! Driving port for client reads.

use async_trait::async_trait;

use crate::domain::{ClientId, ClientPortfolio, Error, client_not_found};

/// Use-case port for reading clients with their mortgages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientQuery: Send + Sync {
    /// Every client, ordered by identifier.
    async fn list(&self) -> Result<Vec<ClientPortfolio>, Error>;

    /// One client; `not_found` when absent.
    async fn get(&self, id: &ClientId) -> Result<ClientPortfolio, Error>;
}

/// Fixture query over an empty client book.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientQuery;

#[async_trait]
impl ClientQuery for FixtureClientQuery {
    async fn list(&self) -> Result<Vec<ClientPortfolio>, Error> {
        Ok(Vec::new())
    }

    async fn get(&self, id: &ClientId) -> Result<ClientPortfolio, Error> {
        Err(client_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_query_finds_nothing() {
        let id = ClientId::parse("12345678Z").expect("valid identifier");
        assert!(FixtureClientQuery.list().await.expect("list").is_empty());

        let error = FixtureClientQuery.get(&id).await.expect_err("absent");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(
            error.message(),
            "No client associated with the identification 12345678Z given"
        );
    }
}
