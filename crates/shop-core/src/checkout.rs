//! # Checkout Service
//!
//! Turns "buy product N" into a hosted checkout session:
//! look the product up, price it in minor units, build a one-item order
//! and hand it to the payment strategy.

use crate::catalog::CatalogStore;
use crate::error::ShopResult;
use crate::order::{CheckoutSession, Order};
use crate::strategy::{BoxedPaymentStrategy, CheckoutUrls};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Starts checkouts for catalog products
#[derive(Clone)]
pub struct CheckoutService {
    catalog: Arc<dyn CatalogStore>,
    strategy: BoxedPaymentStrategy,
    urls: CheckoutUrls,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        strategy: BoxedPaymentStrategy,
        urls: CheckoutUrls,
    ) -> Self {
        Self {
            catalog,
            strategy,
            urls,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.strategy.provider_name()
    }

    /// Create a hosted checkout session for one unit of `product_id`.
    ///
    /// Unknown products fail with `ProductNotFound` before the provider is
    /// contacted. A retryable provider failure is attempted once more with
    /// the same order, so the idempotency key is unchanged.
    #[instrument(skip(self), fields(provider = self.strategy.provider_name()))]
    pub async fn start_checkout(&self, product_id: u64) -> ShopResult<CheckoutSession> {
        let product = self.catalog.get_by_id(product_id)?;
        let order = Order::for_product(&product, self.catalog.currency())?;

        let success_url = self.urls.success_url();
        let cancel_url = self.urls.cancel_url();

        info!(
            "Starting checkout: product={}, order={}, total={}",
            product.id,
            order.id,
            order.total().display()
        );

        let session = match self
            .strategy
            .create_checkout(&order, &success_url, &cancel_url)
            .await
        {
            Err(e) if e.is_retryable() => {
                warn!("Checkout attempt failed, retrying once: {}", e);
                self.strategy
                    .create_checkout(&order, &success_url, &cancel_url)
                    .await?
            }
            other => other?,
        };

        info!(
            "Checkout session created: session={}, order={}",
            session.session_id, session.order_id
        );

        Ok(session)
    }
}
