//! # Request Handlers
//!
//! Axum request handlers for the catalog pages, checkout and the JSON API.

use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shop_core::{CatalogStore, ShopError};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// `?page=N` on list routes
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<usize>,
}

/// Query string the provider appends to the success URL
#[derive(Debug, Default, Deserialize)]
pub struct SuccessQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn status_of(err: &ShopError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Text shown to the customer; provider details stay in the log
fn public_message(err: &ShopError) -> String {
    if err.is_provider_failure() {
        "We could not start the payment right now. Please try again in a moment.".to_string()
    } else if status_of(err).is_server_error() {
        "Internal server error".to_string()
    } else {
        err.to_string()
    }
}

fn log_failure(err: &ShopError) {
    if status_of(err).is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
}

/// Error rendered as an HTML page
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PageError(#[from] pub ShopError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        log_failure(&self.0);
        let status = status_of(&self.0);
        (status, Html(views::error_page(status, &public_message(&self.0)))).into_response()
    }
}

/// Error rendered as JSON
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ShopError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_failure(&self.0);
        let status = status_of(&self.0);
        let body = ErrorResponse::new(public_message(&self.0), status.as_u16());
        (status, Json(body)).into_response()
    }
}

/// Non-numeric ids are unknown products, not bad requests
fn parse_product_id(raw: &str) -> Result<u64, ShopError> {
    raw.parse().map_err(|_| ShopError::not_found(raw))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront",
        "version": env!("CARGO_PKG_VERSION"),
        "products": state.catalog.len().unwrap_or_default(),
        "provider": state.checkout.provider_name(),
    }))
}

/// `/` sends the browser to the catalog
pub async fn index() -> Redirect {
    Redirect::to("/products")
}

/// Product list page
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    let page = state.catalog.list(query.page.unwrap_or(1))?;
    Ok(Html(views::product_list(&page, state.catalog.currency())))
}

/// Product detail page
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let product = state.catalog.get_by_id(parse_product_id(&product_id)?)?;
    Ok(Html(views::product_detail(&product, state.catalog.currency())))
}

/// Checkout confirmation page
#[instrument(skip(state))]
pub async fn checkout_page(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let product = state.catalog.get_by_id(parse_product_id(&product_id)?)?;
    Ok(Html(views::checkout_confirmation(
        &product,
        state.catalog.currency(),
    )))
}

/// Start a hosted checkout and send the browser there with 303 See Other
#[instrument(skip(state))]
pub async fn start_checkout(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Redirect, PageError> {
    let product_id = parse_product_id(&product_id)?;
    let session = state.checkout.start_checkout(product_id).await?;

    info!(
        "Redirecting to hosted checkout: session={}",
        session.session_id
    );

    Ok(Redirect::to(&session.checkout_url))
}

/// Payment success page
pub async fn payment_success(Query(query): Query<SuccessQuery>) -> Html<String> {
    Html(views::payment_success(query.session_id.as_deref()))
}

/// Payment cancel page
pub async fn payment_cancel() -> Html<String> {
    Html(views::payment_cancel())
}

/// Get products list (JSON)
pub async fn api_list_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.catalog.list(query.page.unwrap_or(1))?;
    Ok(Json(serde_json::json!({
        "currency": state.catalog.currency(),
        "products": page.items,
        "page": page.page,
        "per_page": page.per_page,
        "total": page.total,
        "total_pages": page.total_pages(),
    })))
}

/// Get single product (JSON)
pub async fn api_get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.catalog.get_by_id(parse_product_id(&product_id)?)?;
    Ok(Json(product))
}

/// Anything outside the route table
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(views::error_page(StatusCode::NOT_FOUND, "Page not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("12").unwrap(), 12);
        assert!(matches!(
            parse_product_id("abc"),
            Err(ShopError::ProductNotFound { .. })
        ));
        assert!(parse_product_id("-1").is_err());
    }

    #[test]
    fn test_page_error_status() {
        let response = PageError(ShopError::not_found(5)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PageError(ShopError::NetworkError("timeout".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_provider_details_hidden() {
        let err = ShopError::ProviderError {
            provider: "stripe".into(),
            message: "Invalid API Key provided: sk_test_****".into(),
        };
        let message = public_message(&err);
        assert!(!message.contains("sk_test"));

        assert_eq!(public_message(&ShopError::not_found(3)), "Product not found: 3");
        assert_eq!(
            public_message(&ShopError::Internal("lock".into())),
            "Internal server error"
        );
    }
}
