//! Admin REST API client.
//!
//! [`RestClient`] wraps [`HttpClient`](crate::clients::HttpClient) with the
//! `/admin/api/{version}` base path and `.json` path normalization:
//!
//! - leading slashes are stripped: `/products` -> `products.json`
//! - a trailing `.json` is stripped and re-added: `products.json` -> `products.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_bridge::clients::RestClient;
//!
//! let client = RestClient::new(http, &credentials, &config);
//! let response = client.get("products", None).await?;
//! println!("{}", response.body);
//! ```

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
