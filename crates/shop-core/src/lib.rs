//! # shop-core
//!
//! Core types and traits for the storefront catalog and checkout.
//!
//! This crate provides:
//! - `Product`, `Price` and `Currency` with exact minor-unit conversion
//! - `CatalogStore` and the `InMemoryCatalog` implementation
//! - `Order`, `LineItem` and `CheckoutSession` for the checkout flow
//! - `PaymentStrategy` trait for hosted-checkout providers
//! - `CheckoutService`, which starts a checkout for one product
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CheckoutService, CheckoutUrls, Currency, InMemoryCatalog, CatalogSeed};
//!
//! let seed = CatalogSeed::from_toml(include_str!("../../../config/products.toml"))?;
//! let catalog = Arc::new(InMemoryCatalog::with_products(seed.currency, seed.products)?);
//!
//! let checkout = CheckoutService::new(catalog, strategy, CheckoutUrls::new("http://localhost:8080"));
//! let session = checkout.start_checkout(1).await?;
//!
//! // Redirect user to session.checkout_url with 303 See Other
//! ```

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod order;
pub mod product;
pub mod strategy;

// Re-exports for convenience
pub use catalog::{CatalogStore, InMemoryCatalog, Page, PAGE_SIZE};
pub use checkout::CheckoutService;
pub use error::{ShopError, ShopResult};
pub use order::{CheckoutMode, CheckoutSession, LineItem, Order};
pub use product::{CatalogSeed, Currency, NewProduct, Price, Product};
pub use strategy::{BoxedPaymentStrategy, CheckoutUrls, PaymentStrategy, SESSION_ID_PLACEHOLDER};
