//! # shop-web
//!
//! HTTP layer for storefront-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server with an explicit route table
//! - Server-rendered catalog, detail and checkout pages
//! - A small read-only JSON API over the catalog
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/products` | Product list page |
//! | GET | `/products/{id}` | Product detail page |
//! | GET | `/checkout/{id}` | Checkout confirmation page |
//! | POST | `/checkout/{id}` | Start checkout (303 to provider) |
//! | GET | `/payment/success` | Success page |
//! | GET | `/payment/cancel` | Cancel page |
//! | GET | `/api/v1/products` | List products (JSON) |
//! | GET | `/api/v1/products/{id}` | Get product (JSON) |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
