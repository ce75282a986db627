//! # Order Types
//!
//! Provider-agnostic checkout request and session types.

use crate::error::ShopResult;
use crate::product::{Currency, Price, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A line item in an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Product ID
    pub product_id: u64,

    /// Label shown on the hosted checkout page
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price
    pub unit_price: Price,

    /// Quantity
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item from a product, converting its price to minor units
    pub fn from_product(product: &Product, currency: Currency, quantity: u32) -> ShopResult<Self> {
        let description = if product.description.trim().is_empty() {
            None
        } else {
            Some(product.description.clone())
        };

        Ok(Self {
            product_id: product.id,
            name: product.title.clone(),
            description,
            unit_price: product.price_in(currency)?,
            quantity,
        })
    }

    /// Calculate the total price for this line item
    pub fn total(&self) -> Price {
        Price {
            amount: self.unit_price.amount * i64::from(self.quantity),
            currency: self.unit_price.currency,
        }
    }
}

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    Payment,
}

impl Default for CheckoutMode {
    fn default() -> Self {
        CheckoutMode::Payment
    }
}

/// An order to be checked out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID (generated)
    pub id: String,

    /// Line items
    pub line_items: Vec<LineItem>,

    /// Currency (same for all items)
    pub currency: Currency,

    /// Checkout mode
    #[serde(default)]
    pub mode: CheckoutMode,

    /// Idempotency key, reused when the provider call is retried
    pub idempotency_key: String,

    /// Custom metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order with generated ID
    pub fn new(currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            line_items: Vec::new(),
            currency,
            mode: CheckoutMode::Payment,
            idempotency_key: Uuid::new_v4().to_string(),
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Single-item, single-quantity order for one product
    pub fn for_product(product: &Product, currency: Currency) -> ShopResult<Self> {
        let mut order = Self::new(currency).with_metadata("product_id", product.id.to_string());
        order.add_item(LineItem::from_product(product, currency, 1)?);
        Ok(order)
    }

    /// Add a line item
    pub fn add_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    /// Calculate order total
    pub fn total(&self) -> Price {
        let total_amount: i64 = self.line_items.iter().map(|item| item.total().amount).sum();
        Price {
            amount: total_amount,
            currency: self.currency,
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if order is empty
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Get item count
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|i| i.quantity).sum()
    }
}

/// A hosted checkout session created by a payment provider.
///
/// Only the redirect URL is used; the session is not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// Our order ID
    pub order_id: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// URL to redirect customer to
    pub checkout_url: String,

    /// When the session expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product {
            id: 3,
            title: "Platinum Plan".to_string(),
            description: "Full demo item".to_string(),
            price: dec!(499),
        }
    }

    #[test]
    fn test_order_for_product() {
        let order = Order::for_product(&product(), Currency::INR).unwrap();

        assert_eq!(order.mode, CheckoutMode::Payment);
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.line_items[0].name, "Platinum Plan");
        assert_eq!(order.line_items[0].unit_price.amount, 49900);
        assert_eq!(order.total().amount, 49900);
        assert_eq!(order.metadata.get("product_id"), Some(&"3".to_string()));
        assert_ne!(order.id, order.idempotency_key);
    }

    #[test]
    fn test_blank_description_omitted() {
        let mut p = product();
        p.description = "  ".to_string();
        let item = LineItem::from_product(&p, Currency::INR, 1).unwrap();
        assert!(item.description.is_none());
    }

    #[test]
    fn test_line_item_total() {
        let item = LineItem::from_product(&product(), Currency::INR, 3).unwrap();
        assert_eq!(item.total().amount, 149_700);
    }

    #[test]
    fn test_empty_order() {
        let order = Order::new(Currency::INR);
        assert!(order.is_empty());
        assert_eq!(order.total().amount, 0);
    }
}
