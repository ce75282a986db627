//! # Product Types
//!
//! Product catalog types for the storefront.
//! Seed records are loaded from `config/products.toml`.

use crate::error::{ShopError, ShopResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217). A catalog is priced in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "inr",
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
        }
    }

    /// Convert a major-unit amount to the smallest currency unit.
    ///
    /// The amount is first rounded half-up to the currency's decimal places
    /// and then scaled, so `2.005` rupees becomes `201` paise. Negative
    /// amounts and amounts that overflow `i64` are rejected.
    pub fn to_minor_units(&self, amount: Decimal) -> ShopResult<i64> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ShopError::InvalidPrice {
                message: format!("negative amount {}", amount),
            });
        }

        let places = self.decimal_places();
        let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);

        rounded
            .checked_mul(Decimal::from(10_i64.pow(places)))
            .and_then(|minor| minor.to_i64())
            .ok_or_else(|| ShopError::InvalidPrice {
                message: format!("amount {} does not fit in minor units", amount),
            })
    }

    /// Convert from smallest unit back to a major-unit decimal
    pub fn from_minor_units(&self, amount: i64) -> Decimal {
        Decimal::new(amount, self.decimal_places())
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (paise for INR)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a price from a major-unit decimal amount
    pub fn from_major(amount: Decimal, currency: Currency) -> ShopResult<Self> {
        Ok(Self {
            amount: currency.to_minor_units(amount)?,
            currency,
        })
    }

    /// Create a price from smallest unit (paise, cents)
    pub fn from_minor(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Get the decimal amount
    pub fn as_decimal(&self) -> Decimal {
        self.currency.from_minor_units(self.amount)
    }

    /// Format for display with thousands separators (e.g., "₹1,299.00")
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let scale = 10_i64.pow(places);
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let whole = group_thousands(abs / scale as u64);

        if places == 0 {
            format!("{}{}{}", sign, self.currency.symbol(), whole)
        } else {
            let fraction = abs % scale as u64;
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency.symbol(),
                whole,
                fraction,
                width = places as usize
            )
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the catalog store
    pub id: u64,

    /// Display name
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Price in major currency units (rupees for INR)
    pub price: Decimal,
}

impl Product {
    /// Price of this product in the given catalog currency
    pub fn price_in(&self, currency: Currency) -> ShopResult<Price> {
        Price::from_major(self.price, currency)
    }
}

/// A product record before the store has assigned it an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub price: Decimal,
}

impl NewProduct {
    pub fn new(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            price,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Check the record invariants: non-empty title, non-negative price
    pub fn validate(&self) -> ShopResult<()> {
        if self.title.trim().is_empty() {
            return Err(ShopError::InvalidProduct("title must not be empty".to_string()));
        }
        if self.price < Decimal::ZERO {
            return Err(ShopError::InvalidProduct(format!(
                "price of '{}' must not be negative (got {})",
                self.title, self.price
            )));
        }
        Ok(())
    }

    /// Attach a store-assigned id
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
        }
    }
}

/// Seed file contents (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    /// Currency every product in the seed is priced in
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub products: Vec<NewProduct>,
}

impl CatalogSeed {
    /// Load a seed from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
