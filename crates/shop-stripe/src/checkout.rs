//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! The customer pays on Stripe's hosted page; we only need the redirect URL.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shop_core::{
    CheckoutMode, CheckoutSession, Order, PaymentStrategy, ShopError, ShopResult,
};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session strategy
///
/// Uses Stripe's hosted checkout page for one-time card payments.
pub struct StripeCheckoutStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutStrategy {
    /// Create a new Stripe checkout strategy with the configured timeout
    pub fn new(config: StripeConfig) -> ShopResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShopError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Convert our checkout mode to Stripe's mode
    fn stripe_mode(mode: CheckoutMode) -> &'static str {
        match mode {
            CheckoutMode::Payment => "payment",
        }
    }

    /// Flatten an order into Stripe's bracketed form encoding
    fn form_params(order: &Order, success_url: &str, cancel_url: &str) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), Self::stripe_mode(order.mode).to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        for (i, item) in order.line_items.iter().enumerate() {
            form_params.push((
                format!("line_items[{}][price_data][currency]", i),
                item.unit_price.currency.as_str().to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_price.amount.to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            if let Some(ref desc) = item.description {
                form_params.push((
                    format!("line_items[{}][price_data][product_data][description]", i),
                    desc.clone(),
                ));
            }
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params.push(("metadata[order_id]".to_string(), order.id.clone()));
        let mut metadata: Vec<_> = order.metadata.iter().collect();
        metadata.sort();
        for (key, value) in metadata {
            form_params.push((format!("metadata[{}]", key), value.clone()));
        }

        form_params
    }
}

fn transport_error(e: reqwest::Error) -> ShopError {
    if e.is_timeout() {
        ShopError::NetworkError(format!("Stripe request timed out: {}", e))
    } else {
        ShopError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl PaymentStrategy for StripeCheckoutStrategy {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn create_checkout(
        &self,
        order: &Order,
        success_url: &str,
        cancel_url: &str,
    ) -> ShopResult<CheckoutSession> {
        if order.is_empty() {
            return Err(ShopError::InvalidRequest("Order has no items".to_string()));
        }

        let form_params = Self::form_params(order, success_url, cancel_url);

        debug!(
            "Creating Stripe checkout session: {} items, mode={}",
            order.line_items.len(),
            Self::stripe_mode(order.mode)
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &order.idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            error!("Stripe rate limited the checkout request");
            return Err(ShopError::RateLimited {
                provider: PROVIDER.to_string(),
            });
        }

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = match serde_json::from_str::<StripeErrorResponse>(&body) {
                Ok(error_response) => error_response.error.message,
                Err(_) => format!("HTTP {}: {}", status, body),
            };

            return Err(ShopError::ProviderError {
                provider: PROVIDER.to_string(),
                message,
            });
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                ShopError::MalformedResponse(format!("Failed to parse Stripe response: {}", e))
            })?;

        let checkout_url = session_response.url.ok_or_else(|| {
            ShopError::MalformedResponse("Stripe session has no checkout URL".to_string())
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, checkout_url
        );

        Ok(CheckoutSession {
            session_id: session_response.id,
            order_id: order.id.clone(),
            provider: PROVIDER.to_string(),
            checkout_url,
            expires_at: session_response
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            created_at: Utc::now(),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::{Currency, LineItem, Price};

    fn order() -> Order {
        let mut order = Order::new(Currency::INR).with_metadata("product_id", "1");
        order.add_item(LineItem {
            product_id: 1,
            name: "Basic Plan".to_string(),
            description: Some("One-time demo item".to_string()),
            unit_price: Price::from_minor(19900, Currency::INR),
            quantity: 1,
        });
        order
    }

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_stripe_mode_conversion() {
        assert_eq!(
            StripeCheckoutStrategy::stripe_mode(CheckoutMode::Payment),
            "payment"
        );
    }

    #[test]
    fn test_form_params() {
        let order = order();
        let params = StripeCheckoutStrategy::form_params(
            &order,
            "http://localhost:8080/payment/success?session_id={CHECKOUT_SESSION_ID}",
            "http://localhost:8080/payment/cancel",
        );

        assert_eq!(param(&params, "mode"), Some("payment"));
        assert_eq!(param(&params, "payment_method_types[0]"), Some("card"));
        assert_eq!(param(&params, "line_items[0][price_data][currency]"), Some("inr"));
        assert_eq!(param(&params, "line_items[0][price_data][unit_amount]"), Some("19900"));
        assert_eq!(
            param(&params, "line_items[0][price_data][product_data][name]"),
            Some("Basic Plan")
        );
        assert_eq!(param(&params, "line_items[0][quantity]"), Some("1"));
        assert_eq!(param(&params, "metadata[order_id]"), Some(order.id.as_str()));
        assert_eq!(param(&params, "metadata[product_id]"), Some("1"));
        assert!(param(&params, "line_items[1][quantity]").is_none());
    }

    #[tokio::test]
    async fn test_empty_order_rejected_before_request() {
        // Unroutable base URL: reaching the network would fail differently
        let config = StripeConfig::new("sk_test_abc").with_api_base_url("http://127.0.0.1:9");
        let strategy = StripeCheckoutStrategy::new(config).unwrap();

        let err = strategy
            .create_checkout(&Order::new(Currency::INR), "s", "c")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::InvalidRequest(_)));
    }
}
