//! Product catalog proxy.
//!
//! Products are correlated with an external code stored in their `tags`
//! field, and every product the bridge creates carries a sentinel metafield
//! (`global.ihubCheck = "ihub"`).
//!
//! - [`find_product`]: paginated linear scan for a product by external code
//! - [`create_product`], [`update_product`], [`delete_product`]: writes
//! - [`check_sentinel`], [`list_products`]: reads
//!
//! All of them run against a [`CatalogStore`], implemented for
//! [`RestClient`](crate::clients::RestClient).

mod error;
mod model;
mod operations;
mod store;

pub use error::CatalogError;
pub use model::{
    sentinel_metafield, with_sentinel, ExternalCode, Metafield, ProductRef, SENTINEL_KEY,
    SENTINEL_NAMESPACE, SENTINEL_VALUE,
};
pub use operations::{
    check_sentinel, create_product, delete_product, find_product, list_products, update_product,
    SentinelCheck,
};
pub use store::{CatalogStore, PAGE_SIZE};
