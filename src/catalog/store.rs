//! Access to a shop's product catalog.
//!
//! The operations in [`crate::catalog`] only talk to a [`CatalogStore`], so
//! they can run against the Admin REST API ([`RestClient`]) or an in-memory
//! catalog in tests.

use std::collections::HashMap;
use std::future::Future;

use serde_json::{json, Value};

use crate::catalog::model::{Metafield, MetafieldsEnvelope, ProductRef, ProductsEnvelope};
use crate::catalog::CatalogError;
use crate::clients::RestClient;

/// Largest page the Admin API serves.
pub const PAGE_SIZE: usize = 250;

/// The catalog calls the bridge needs.
pub trait CatalogStore {
    /// One page of up to [`PAGE_SIZE`] products (`id` and `tags` only), with
    /// ids strictly greater than `since_id`, in ascending id order.
    fn product_page(
        &self,
        since_id: Option<u64>,
    ) -> impl Future<Output = Result<Vec<ProductRef>, CatalogError>> + Send;

    /// Creates a product from its JSON representation.
    fn create_product(&self, product: Value)
        -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Overwrites the given fields of product `id`.
    fn update_product(
        &self,
        id: u64,
        product: Value,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Deletes product `id`.
    fn delete_product(&self, id: u64) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Metafields attached to product `id`.
    fn product_metafields(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Vec<Metafield>, CatalogError>> + Send;

    /// First page of products with `id` and `tags`, as the raw upstream body.
    fn list_products(&self) -> impl Future<Output = Result<String, CatalogError>> + Send;
}

fn lookup_query(since_id: Option<u64>) -> HashMap<String, String> {
    let mut query = HashMap::from([
        ("fields".to_string(), "id,tags".to_string()),
        ("limit".to_string(), PAGE_SIZE.to_string()),
    ]);
    if let Some(since_id) = since_id {
        query.insert("since_id".to_string(), since_id.to_string());
    }
    query
}

impl CatalogStore for RestClient {
    async fn product_page(&self, since_id: Option<u64>) -> Result<Vec<ProductRef>, CatalogError> {
        let response = self.get("products", Some(lookup_query(since_id))).await?;
        let envelope: ProductsEnvelope = response.json().map_err(crate::clients::RestError::from)?;
        Ok(envelope.products)
    }

    async fn create_product(&self, product: Value) -> Result<(), CatalogError> {
        self.post("products", json!({ "product": product }), None)
            .await?;
        Ok(())
    }

    async fn update_product(&self, id: u64, product: Value) -> Result<(), CatalogError> {
        self.put(&format!("products/{id}"), json!({ "product": product }), None)
            .await?;
        Ok(())
    }

    async fn delete_product(&self, id: u64) -> Result<(), CatalogError> {
        self.delete(&format!("products/{id}"), None).await?;
        Ok(())
    }

    async fn product_metafields(&self, id: u64) -> Result<Vec<Metafield>, CatalogError> {
        let response = self.get(&format!("products/{id}/metafields"), None).await?;
        let envelope: MetafieldsEnvelope =
            response.json().map_err(crate::clients::RestError::from)?;
        Ok(envelope.metafields)
    }

    async fn list_products(&self) -> Result<String, CatalogError> {
        let query = HashMap::from([("fields".to_string(), "id,tags".to_string())]);
        let response = self.get("products", Some(query)).await?;
        Ok(response.body)
    }
}
