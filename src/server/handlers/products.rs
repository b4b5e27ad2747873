//! Catalog proxy routes.
//!
//! Each handler builds a [`RestClient`] from the caller's credentials and
//! runs one [`crate::catalog`] operation against it.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::ShopCredentials;
use crate::catalog::{self, ExternalCode};
use crate::clients::RestClient;
use crate::server::error::ApiError;
use crate::server::extract::ShopAuth;
use crate::server::AppState;

/// Body of `POST /products:delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    /// External code of the product to delete.
    #[serde(rename = "ihubCode")]
    pub ihub_code: ExternalCode,
}

/// Query of `GET /products:checkSentinel`.
#[derive(Debug, Deserialize)]
pub struct SentinelParams {
    /// Platform product id.
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

fn rest_client(state: &AppState, credentials: &ShopCredentials) -> RestClient {
    RestClient::new(state.http.clone(), credentials, &state.config)
}

/// `POST /products:create`
pub async fn create(
    State(state): State<AppState>,
    ShopAuth(credentials): ShopAuth,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(payload) = body?;
    catalog::create_product(&rest_client(&state, &credentials), payload).await?;
    Ok("OK")
}

/// `POST /products:update`
pub async fn update(
    State(state): State<AppState>,
    ShopAuth(credentials): ShopAuth,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(payload) = body?;
    catalog::update_product(&rest_client(&state, &credentials), payload).await?;
    Ok("OK")
}

/// `POST /products:delete`
pub async fn delete(
    State(state): State<AppState>,
    ShopAuth(credentials): ShopAuth,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(request) = body?;
    let code = request.ihub_code.into_code();
    let code = code.trim();
    if code.is_empty() {
        return Err(ApiError::BadRequest("ihubCode is required".to_string()));
    }

    catalog::delete_product(&rest_client(&state, &credentials), code).await?;
    Ok("OK")
}

/// `GET /products:checkSentinel?productId=<id>`
///
/// Failures answer `{"error": ..., "check": false}` with the matching status.
pub async fn check_sentinel(
    State(state): State<AppState>,
    ShopAuth(credentials): ShopAuth,
    Query(params): Query<SentinelParams>,
) -> Response {
    let Some(id) = params
        .product_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
    else {
        return ApiError::BadRequest("productId must be a product id".to_string())
            .into_sentinel_response();
    };

    match catalog::check_sentinel(&rest_client(&state, &credentials), id).await {
        Ok(result) => Json(result).into_response(),
        Err(error) => ApiError::from(error).into_sentinel_response(),
    }
}

/// `GET /products:list`
pub async fn list(
    State(state): State<AppState>,
    ShopAuth(credentials): ShopAuth,
) -> Result<Response, ApiError> {
    let body = catalog::list_products(&rest_client(&state, &credentials)).await?;
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}
