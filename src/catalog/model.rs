//! Catalog data shapes and the sentinel metafield.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::CatalogError;

/// Namespace of the sentinel metafield.
pub const SENTINEL_NAMESPACE: &str = "global";
/// Key of the sentinel metafield.
pub const SENTINEL_KEY: &str = "ihubCheck";
/// Value of the sentinel metafield.
pub const SENTINEL_VALUE: &str = "ihub";

/// The two product fields the lookup asks for (`fields=id,tags`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRef {
    /// Platform product id.
    pub id: u64,
    /// Raw tags string; compared as a whole against an external code.
    #[serde(default)]
    pub tags: String,
}

/// A metafield as listed under `products/{id}/metafields`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metafield {
    /// Read-only id.
    #[serde(skip_serializing)]
    pub id: Option<u64>,
    /// Namespace grouping related metafields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Key within the namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Stored value. Serialized as a string by the platform for text types;
    /// other types are kept as raw JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Metafield type, e.g. `single_line_text_field`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metafield_type: Option<String>,
}

impl Metafield {
    /// Whether this metafield carries the sentinel key.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.key.as_deref() == Some(SENTINEL_KEY)
    }
}

/// External code identifying a product through its `tags`.
///
/// Callers send it either as a JSON string or a number; a number matches the
/// tags string spelling the same digits.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExternalCode {
    /// `"ABC-123"`
    Text(String),
    /// `123`
    Number(serde_json::Number),
}

impl ExternalCode {
    /// Reads a code out of an arbitrary JSON value, if it is a string or number.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => Some(Self::Number(number.clone())),
            _ => None,
        }
    }

    /// The code as compared against `tags`.
    #[must_use]
    pub fn into_code(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<ProductRef>,
}

#[derive(Deserialize)]
pub(crate) struct MetafieldsEnvelope {
    #[serde(default)]
    pub metafields: Vec<Metafield>,
}

/// JSON of the sentinel metafield attached to every created product.
#[must_use]
pub fn sentinel_metafield() -> Value {
    json!({
        "key": SENTINEL_KEY,
        "value": SENTINEL_VALUE,
        "value_type": "string",
        "type": "single_line_text_field",
        "namespace": SENTINEL_NAMESPACE,
    })
}

/// Appends the sentinel to `product.metafields`, creating the array when it
/// is absent or `null`. Every other field is left untouched.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidPayload`] if `product` is not an object or
/// its `metafields` is neither an array nor absent.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::catalog::with_sentinel;
/// use serde_json::json;
///
/// let product = with_sentinel(json!({"title": "Mug"})).unwrap();
/// assert_eq!(product["title"], "Mug");
/// assert_eq!(product["metafields"][0]["key"], "ihubCheck");
/// ```
pub fn with_sentinel(mut product: Value) -> Result<Value, CatalogError> {
    let fields = product
        .as_object_mut()
        .ok_or_else(|| CatalogError::InvalidPayload("product must be a JSON object".to_string()))?;

    let metafields = fields
        .entry("metafields")
        .or_insert_with(|| Value::Array(Vec::new()));
    if metafields.is_null() {
        *metafields = Value::Array(Vec::new());
    }

    metafields
        .as_array_mut()
        .ok_or_else(|| CatalogError::InvalidPayload("product.metafields must be an array".to_string()))?
        .push(sentinel_metafield());

    Ok(product)
}
