//! Catalog proxy operations.
//!
//! Every operation takes the caller's JSON payload, does the minimum of
//! interpretation the bridge needs (sentinel injection, external code
//! lookup, id substitution) and leaves the rest to the platform.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::model::{with_sentinel, ExternalCode, ProductRef};
use crate::catalog::store::CatalogStore;
use crate::catalog::CatalogError;

/// Result of [`check_sentinel`].
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct SentinelCheck {
    /// `true` when the product has no metafield keyed `ihubCheck`.
    pub check: bool,
}

/// Finds the first product whose `tags` equal `code`.
///
/// Pages through the catalog [`PAGE_SIZE`](crate::catalog::PAGE_SIZE)
/// products at a time, resuming after the last id seen, one request at a
/// time. Stops at the first match or the first empty page.
///
/// # Errors
///
/// Propagates the first failing page fetch.
pub async fn find_product<S>(store: &S, code: &str) -> Result<Option<ProductRef>, CatalogError>
where
    S: CatalogStore + Sync,
{
    let mut since_id = None;
    let mut pages = 0_usize;

    loop {
        let page = store.product_page(since_id).await?;
        pages += 1;

        let Some(last) = page.last() else {
            tracing::debug!(code, pages, "no product carries external code");
            return Ok(None);
        };
        since_id = Some(last.id);

        if let Some(found) = page.into_iter().find(|product| product.tags == code) {
            tracing::debug!(code, pages, id = found.id, "found product by external code");
            return Ok(Some(found));
        }
    }
}

/// Creates `payload.product` with the sentinel metafield appended.
///
/// After the write, the products tagged like the new one are fetched and
/// logged. That lookup is informational: its failure is logged and does not
/// fail the creation.
///
/// # Errors
///
/// - [`CatalogError::InvalidPayload`] when `product` is missing or malformed
/// - [`CatalogError::Rest`] when the platform rejects the product
pub async fn create_product<S>(store: &S, payload: Value) -> Result<(), CatalogError>
where
    S: CatalogStore + Sync,
{
    let product = take_product(payload)?;
    let tags = product
        .get("tags")
        .and_then(ExternalCode::from_value)
        .map(ExternalCode::into_code);

    store.create_product(with_sentinel(product)?).await?;

    match store.product_page(None).await {
        Ok(page) => {
            let matching: Vec<u64> = page
                .iter()
                .filter(|p| tags.as_deref() == Some(p.tags.as_str()))
                .map(|p| p.id)
                .collect();
            tracing::info!(tags = tags.as_deref().unwrap_or(""), ids = ?matching, "product created");
        }
        Err(error) => {
            tracing::warn!(%error, "product created, confirmation lookup failed");
        }
    }

    Ok(())
}

/// Updates the product whose tags equal `payload.product.tags`.
///
/// The looked-up id is written into the product before it is sent.
///
/// # Errors
///
/// - [`CatalogError::InvalidPayload`] when `product` or its `tags` is missing
/// - [`CatalogError::ProductNotFound`] when no product carries the code;
///   nothing is written in that case
/// - [`CatalogError::Rest`] when a platform call fails
pub async fn update_product<S>(store: &S, payload: Value) -> Result<(), CatalogError>
where
    S: CatalogStore + Sync,
{
    let mut product = take_product(payload)?;
    let code = product
        .get("tags")
        .and_then(ExternalCode::from_value)
        .map(ExternalCode::into_code)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| CatalogError::InvalidPayload("product.tags is required".to_string()))?;

    let existing = find_product(store, &code)
        .await?
        .ok_or(CatalogError::ProductNotFound)?;

    if let Some(fields) = product.as_object_mut() {
        fields.insert("id".to_string(), Value::from(existing.id));
    }

    store.update_product(existing.id, product).await?;
    tracing::info!(id = existing.id, code = %code, "product updated");
    Ok(())
}

/// Deletes the product whose tags equal `code`.
///
/// # Errors
///
/// - [`CatalogError::ProductNotFound`] when no product carries the code
/// - [`CatalogError::Rest`] when a platform call fails
pub async fn delete_product<S>(store: &S, code: &str) -> Result<(), CatalogError>
where
    S: CatalogStore + Sync,
{
    let existing = find_product(store, code)
        .await?
        .ok_or(CatalogError::ProductNotFound)?;

    store.delete_product(existing.id).await?;
    tracing::info!(id = existing.id, code, "product deleted");
    Ok(())
}

/// Reports whether product `id` lacks the sentinel metafield.
///
/// `check` is `true` when the product has no metafields at all, or none
/// keyed `ihubCheck`, and `false` when the sentinel is present.
///
/// # Errors
///
/// [`CatalogError::Rest`] when the metafields cannot be fetched.
pub async fn check_sentinel<S>(store: &S, id: u64) -> Result<SentinelCheck, CatalogError>
where
    S: CatalogStore + Sync,
{
    let metafields = store.product_metafields(id).await?;
    let check = !metafields.iter().any(|metafield| metafield.is_sentinel());
    Ok(SentinelCheck { check })
}

/// Lists products (`id` and `tags`), returning the platform's body untouched.
///
/// # Errors
///
/// [`CatalogError::Rest`] when the platform call fails.
pub async fn list_products<S>(store: &S) -> Result<String, CatalogError>
where
    S: CatalogStore + Sync,
{
    store.list_products().await
}

fn take_product(payload: Value) -> Result<Value, CatalogError> {
    match payload {
        Value::Object(mut fields) => match fields.remove("product") {
            Some(product @ Value::Object(_)) => Ok(product),
            _ => Err(CatalogError::InvalidPayload(
                "product must be a JSON object".to_string(),
            )),
        },
        _ => Err(CatalogError::InvalidPayload(
            "request body must be a JSON object".to_string(),
        )),
    }
}
