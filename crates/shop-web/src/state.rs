//! # Application State
//!
//! Shared state for the Axum application.
//! Contains configuration, the catalog store and the checkout service.

use anyhow::Context;
use shop_core::{
    BoxedPaymentStrategy, CatalogSeed, CatalogStore, CheckoutService, CheckoutUrls,
    InMemoryCatalog,
};
use shop_stripe::StripeCheckoutStrategy;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Catalog compiled into the binary, used when no seed file is found
const BUNDLED_CATALOG: &str = include_str!("../../../config/products.toml");

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for payment callbacks
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit catalog seed file
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            catalog_path: lookup("CATALOG_PATH").map(PathBuf::from),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Product catalog
    pub catalog: Arc<dyn CatalogStore>,
    /// Checkout initiator
    pub checkout: CheckoutService,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from the environment with the Stripe strategy
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let catalog = load_catalog(&config)?;

        let stripe_strategy = StripeCheckoutStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        info!("Stripe configured: {:?}", stripe_strategy.config());

        Ok(Self::from_parts(
            config,
            Arc::new(catalog),
            Arc::new(stripe_strategy),
        ))
    }

    /// Assemble state from explicit parts (used by tests and `new`)
    pub fn from_parts(
        config: AppConfig,
        catalog: Arc<dyn CatalogStore>,
        strategy: BoxedPaymentStrategy,
    ) -> Self {
        let urls = CheckoutUrls::new(&config.base_url);
        let checkout = CheckoutService::new(catalog.clone(), strategy, urls);

        Self {
            catalog,
            checkout,
            config,
        }
    }
}

/// Seed the catalog from `CATALOG_PATH`, a `config/products.toml` found
/// near the working directory, or the bundled demo catalog.
pub fn load_catalog(config: &AppConfig) -> anyhow::Result<InMemoryCatalog> {
    if let Some(path) = &config.catalog_path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        return seed_catalog(&content, path);
    }

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            return seed_catalog(&content, Path::new(path));
        }
    }

    warn!("No catalog file found, using bundled demo catalog");
    seed_catalog(BUNDLED_CATALOG, Path::new("<bundled>"))
}

fn seed_catalog(content: &str, source: &Path) -> anyhow::Result<InMemoryCatalog> {
    let seed = CatalogSeed::from_toml(content)
        .with_context(|| format!("Failed to parse {}", source.display()))?;

    let catalog = InMemoryCatalog::with_products(seed.currency, seed.products)
        .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", source.display(), e))?;

    info!(
        "Loaded {} products ({}) from {}",
        catalog.len().unwrap_or_default(),
        seed.currency,
        source.display()
    );
    Ok(catalog)
}
