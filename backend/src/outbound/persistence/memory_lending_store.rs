//! In-memory client and mortgage store.
//!
//! One lock guards both maps so cascade deletes and owner checks see a
//! consistent book. Every check-and-set happens under the write lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    ClientRepository, ClientRepositoryError, MortgageRepository, MortgageRepositoryError,
};
use crate::domain::{Client, ClientId, ClientPortfolio, Mortgage, MortgageKey};

#[derive(Debug, Default)]
struct LendingBook {
    clients: BTreeMap<ClientId, Client>,
    mortgages: BTreeMap<MortgageKey, Mortgage>,
}

impl LendingBook {
    fn owned_by(&self, client: &ClientId) -> Vec<Mortgage> {
        self.mortgages
            .values()
            .filter(|mortgage| mortgage.client() == client)
            .cloned()
            .collect()
    }
}

/// Process-local store backing both repository ports.
///
/// Clones share the same book.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLendingStore {
    book: Arc<RwLock<LendingBook>>,
}

impl InMemoryLendingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryLendingStore {
    async fn list(&self) -> Result<Vec<Client>, ClientRepositoryError> {
        let book = self.book.read().await;
        Ok(book.clients.values().cloned().collect())
    }

    async fn find(&self, id: &ClientId) -> Result<Option<Client>, ClientRepositoryError> {
        let book = self.book.read().await;
        Ok(book.clients.get(id).cloned())
    }

    async fn insert(&self, client: &Client) -> Result<(), ClientRepositoryError> {
        let mut book = self.book.write().await;
        if book.clients.contains_key(client.id()) {
            return Err(ClientRepositoryError::duplicate(client.id().to_string()));
        }
        book.clients.insert(client.id().clone(), client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), ClientRepositoryError> {
        let mut book = self.book.write().await;
        let Some(stored) = book.clients.get_mut(client.id()) else {
            return Err(ClientRepositoryError::missing(client.id().to_string()));
        };
        *stored = client.clone();
        Ok(())
    }

    async fn delete(
        &self,
        id: &ClientId,
    ) -> Result<Option<ClientPortfolio>, ClientRepositoryError> {
        let mut book = self.book.write().await;
        let Some(client) = book.clients.remove(id) else {
            return Ok(None);
        };
        let mortgages = book.owned_by(id);
        for mortgage in &mortgages {
            book.mortgages.remove(mortgage.key());
        }
        Ok(Some(ClientPortfolio::new(client, mortgages)))
    }
}

#[async_trait]
impl MortgageRepository for InMemoryLendingStore {
    async fn list(&self) -> Result<Vec<Mortgage>, MortgageRepositoryError> {
        let book = self.book.read().await;
        Ok(book.mortgages.values().cloned().collect())
    }

    async fn list_for_client(
        &self,
        client: &ClientId,
    ) -> Result<Vec<Mortgage>, MortgageRepositoryError> {
        let book = self.book.read().await;
        Ok(book.owned_by(client))
    }

    async fn insert_or_get(&self, mortgage: &Mortgage) -> Result<Mortgage, MortgageRepositoryError> {
        let mut book = self.book.write().await;
        if !book.clients.contains_key(mortgage.client()) {
            return Err(MortgageRepositoryError::owner_missing(
                mortgage.client().to_string(),
            ));
        }
        let stored = book
            .mortgages
            .entry(mortgage.key().clone())
            .or_insert_with(|| mortgage.clone());
        Ok(stored.clone())
    }

    async fn delete(&self, key: &MortgageKey) -> Result<Option<Mortgage>, MortgageRepositoryError> {
        let mut book = self.book.write().await;
        Ok(book.mortgages.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MortgageTerms;
    use rstest::{fixture, rstest};

    fn client_id(raw: &str) -> ClientId {
        ClientId::parse(raw).expect("valid identifier")
    }

    fn mortgage(owner: &str, tae: u32, years: u32, fee: f64) -> Mortgage {
        Mortgage::from_parts(
            MortgageKey::new(client_id(owner), MortgageTerms::new(tae, years)),
            fee,
        )
    }

    #[fixture]
    fn store() -> InMemoryLendingStore {
        InMemoryLendingStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_client_insert_fails(store: InMemoryLendingStore) {
        let client = Client::new(client_id("12345678Z"));
        ClientRepository::insert(&store, &client).await.expect("first insert");

        let again = Client::new(client_id("12345678z")).with_name("Other");
        assert_eq!(
            ClientRepository::insert(&store, &again).await,
            Err(ClientRepositoryError::Duplicate {
                identifier: "12345678Z".to_owned()
            })
        );
        let stored = ClientRepository::find(&store, client.id()).await.expect("find");
        assert_eq!(stored, Some(client));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_client_fails(store: InMemoryLendingStore) {
        let client = Client::new(client_id("12345678Z"));
        assert!(matches!(
            ClientRepository::update(&store, &client).await,
            Err(ClientRepositoryError::Missing { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn first_mortgage_under_a_key_wins(store: InMemoryLendingStore) {
        ClientRepository::insert(&store, &Client::new(client_id("12345678Z")))
            .await
            .expect("insert client");

        let first = mortgage("12345678Z", 3, 20, 100.0);
        let second = mortgage("12345678Z", 3, 20, 999.0);
        assert_eq!(store.insert_or_get(&first).await, Ok(first.clone()));
        assert_eq!(store.insert_or_get(&second).await, Ok(first));
    }

    #[rstest]
    #[tokio::test]
    async fn mortgages_are_scoped_per_client(store: InMemoryLendingStore) {
        for raw in ["12345678Z", "B00000000"] {
            ClientRepository::insert(&store, &Client::new(client_id(raw)))
                .await
                .expect("insert client");
        }
        let ada = mortgage("12345678Z", 3, 20, 100.0);
        let acme = mortgage("B00000000", 3, 20, 200.0);
        store.insert_or_get(&ada).await.expect("insert");
        store.insert_or_get(&acme).await.expect("insert");

        let owned = store
            .list_for_client(&client_id("B00000000"))
            .await
            .expect("list");
        assert_eq!(owned, vec![acme]);
        assert_eq!(MortgageRepository::list(&store).await.expect("list").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn mortgage_for_missing_owner_is_rejected(store: InMemoryLendingStore) {
        let orphan = mortgage("12345678Z", 3, 20, 100.0);
        assert_eq!(
            store.insert_or_get(&orphan).await,
            Err(MortgageRepositoryError::OwnerMissing {
                identifier: "12345678Z".to_owned()
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn client_delete_cascades_to_owned_mortgages(store: InMemoryLendingStore) {
        for raw in ["12345678Z", "B00000000"] {
            ClientRepository::insert(&store, &Client::new(client_id(raw)))
                .await
                .expect("insert client");
        }
        let owned = [mortgage("12345678Z", 3, 20, 1.0), mortgage("12345678Z", 4, 10, 2.0)];
        for item in &owned {
            store.insert_or_get(item).await.expect("insert");
        }
        let kept = mortgage("B00000000", 3, 20, 3.0);
        store.insert_or_get(&kept).await.expect("insert");

        let removed = ClientRepository::delete(&store, &client_id("12345678Z"))
            .await
            .expect("delete")
            .expect("client existed");
        assert_eq!(removed.mortgages, owned.to_vec());
        assert_eq!(MortgageRepository::list(&store).await.expect("list"), vec![kept]);
        assert_eq!(
            ClientRepository::delete(&store, &client_id("12345678Z")).await,
            Ok(None)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn mortgage_delete_reports_absence(store: InMemoryLendingStore) {
        let key = MortgageKey::new(client_id("12345678Z"), MortgageTerms::new(1, 1));
        assert_eq!(MortgageRepository::delete(&store, &key).await, Ok(None));
    }
}
