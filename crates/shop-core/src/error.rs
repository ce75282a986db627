//! # Shop Error Types
//!
//! Typed error handling for the storefront catalog and checkout.
//! All catalog and checkout operations return `Result<T, ShopError>`.

use thiserror::Error;

/// Core error type for catalog and checkout operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A product record violates the catalog invariants
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Amount cannot be expressed in minor units
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// Payment provider rejected the request
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Provider answered with something we could not decode
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Network/HTTP error communicating with provider (includes timeouts)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Rate limited by provider
    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Shorthand for an unknown product id
    pub fn not_found(product_id: impl ToString) -> Self {
        ShopError::ProductNotFound {
            product_id: product_id.to_string(),
        }
    }

    /// Returns true if a second attempt at the same provider call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ShopError::NetworkError(_) | ShopError::RateLimited { .. }
        )
    }

    /// Returns true if the failure originated at the payment provider
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            ShopError::ProviderError { .. }
                | ShopError::MalformedResponse(_)
                | ShopError::NetworkError(_)
                | ShopError::RateLimited { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidProduct(_) => 400,
            ShopError::InvalidRequest(_) => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::InvalidPrice { .. } => 400,
            ShopError::ProviderError { .. } => 502,
            ShopError::MalformedResponse(_) => 502,
            ShopError::NetworkError(_) => 503,
            ShopError::RateLimited { .. } => 503,
            ShopError::Internal(_) => 500,
        }
    }
}

/// Result type alias for catalog and checkout operations
pub type ShopResult<T> = Result<T, ShopError>;
