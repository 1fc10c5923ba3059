//! Source of the local half of a catalog search.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use medstock_inventory::{InventoryStore, MedicineRecord, StoreError};

#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("inventory request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("inventory service returned status {0}")]
    Status(u16),
}

/// Full listing of the local inventory.
#[async_trait]
pub trait LocalListing: Send + Sync {
    async fn list(&self) -> Result<Vec<MedicineRecord>, ListingError>;
}

/// In-process stores list directly.
#[async_trait]
impl<S> LocalListing for S
where
    S: InventoryStore,
{
    async fn list(&self) -> Result<Vec<MedicineRecord>, ListingError> {
        Ok(InventoryStore::list(self)?)
    }
}

/// Lists a remote inventory service over `GET {base}/medicine/list`.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ListingError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }
}

#[async_trait]
impl LocalListing for HttpInventoryClient {
    async fn list(&self) -> Result<Vec<MedicineRecord>, ListingError> {
        let url = format!("{}/medicine/list", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ListingError::Status(resp.status().as_u16()));
        }

        Ok(resp.json::<Vec<MedicineRecord>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medstock_inventory::{InMemoryInventoryStore, MedicineForm};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn store_lists_through_the_listing_seam() {
        let store = InMemoryInventoryStore::new();
        store
            .insert(
                &MedicineForm::new()
                    .with("name", "Dolo")
                    .with("manufacturer", "Micro")
                    .with("skuType", "otc")
                    .with("skuLabel", "650mg")
                    .with("quantity", "10")
                    .with("price", "25"),
            )
            .unwrap();

        let listed = LocalListing::list(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn http_client_reads_medicine_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/medicine/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Dolo", "manufacturer": "Micro", "skuType": "otc",
                 "skuLabel": "650mg", "quantity": 10, "price": 25}
            ])))
            .mount(&server)
            .await;

        let client =
            HttpInventoryClient::new(format!("{}/", server.uri()), Duration::from_secs(2)).unwrap();
        let listed = client.list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Dolo");
        assert_eq!(listed[0].id.get(), 1);
    }

    #[tokio::test]
    async fn http_client_rejects_zero_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/medicine/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 0, "name": "Dolo", "manufacturer": "Micro", "skuType": "otc",
                 "skuLabel": "650mg", "quantity": 10, "price": 25}
            ])))
            .mount(&server)
            .await;

        let client = HttpInventoryClient::new(server.uri(), Duration::from_secs(2)).unwrap();
        assert!(matches!(client.list().await, Err(ListingError::Network(_))));
    }

    #[tokio::test]
    async fn http_client_surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/medicine/list"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HttpInventoryClient::new(server.uri(), Duration::from_secs(2)).unwrap();
        assert!(matches!(client.list().await, Err(ListingError::Status(500))));
    }
}
