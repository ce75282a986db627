//! # Routes
//!
//! The route table, resolved once at startup.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main application router
///
/// Routes:
/// - Pages:
///   - GET  /                      - Redirect to /products
///   - GET  /products              - Product list (`?page=N`)
///   - GET  /products/{product_id} - Product detail
///   - GET  /checkout/{product_id} - Checkout confirmation
///   - POST /checkout/{product_id} - Start checkout, 303 to provider
///   - GET  /payment/success       - Success page
///   - GET  /payment/cancel        - Cancel page
///
/// - JSON API:
///   - GET /api/v1/products              - List products
///   - GET /api/v1/products/{product_id} - Get product by ID
///
/// - GET /health - Health check
pub fn create_router(state: AppState) -> Router {
    let checkout_routes = Router::new().route(
        "/{product_id}",
        get(handlers::checkout_page).post(handlers::start_checkout),
    );

    // Provider redirects land here; nothing is verified
    let payment_routes = Router::new()
        .route("/success", get(handlers::payment_success))
        .route("/cancel", get(handlers::payment_cancel));

    let api_routes = Router::new()
        .route("/products", get(handlers::api_list_products))
        .route("/products/{product_id}", get(handlers::api_get_product));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::show_product))
        .nest("/checkout", checkout_routes)
        .nest("/payment", payment_routes)
        .nest("/api/v1", api_routes)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
