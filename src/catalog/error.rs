//! Catalog operation errors.

use thiserror::Error;

use crate::clients::RestError;

/// Errors returned by the catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product carries the requested external code.
    #[error("Product Not Found")]
    ProductNotFound,

    /// The caller's payload is missing a field or has the wrong shape.
    #[error("{0}")]
    InvalidPayload(String),

    /// The platform call failed.
    #[error(transparent)]
    Rest(#[from] RestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(CatalogError::ProductNotFound.to_string(), "Product Not Found");
    }

    #[test]
    fn test_invalid_payload_is_the_reason() {
        let error = CatalogError::InvalidPayload("product.tags is required".to_string());
        assert_eq!(error.to_string(), "product.tags is required");
    }
}
