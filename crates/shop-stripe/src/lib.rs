//! # shop-stripe
//!
//! Stripe Checkout strategy for storefront-rs.
//!
//! `StripeCheckoutStrategy` implements `shop_core::PaymentStrategy` on top of
//! the Checkout Sessions API: one-time card payments on Stripe's hosted page.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeCheckoutStrategy;
//! use shop_core::{Order, Currency, PaymentStrategy};
//!
//! // Create strategy from environment
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! // Create checkout session
//! let session = strategy.create_checkout(
//!     &order,
//!     "http://localhost:8080/payment/success?session_id={CHECKOUT_SESSION_ID}",
//!     "http://localhost:8080/payment/cancel",
//! ).await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
