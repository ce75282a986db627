//! # Catalog Store
//!
//! Read-mostly product storage. Handlers receive the store as an
//! `Arc<dyn CatalogStore>` so it can be replaced by a test double.

use crate::error::{ShopError, ShopResult};
use crate::product::{Currency, NewProduct, Product};
use serde::Serialize;
use std::sync::RwLock;
use tracing::info;

/// Number of products on one list page
pub const PAGE_SIZE: usize = 9;

/// One page of an ordered listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    /// Total number of records across all pages
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Storage contract for catalog records.
///
/// `list` and `get_by_id` serve requests; `seed` runs at startup or in tests.
pub trait CatalogStore: Send + Sync {
    /// Currency every product price is denominated in
    fn currency(&self) -> Currency;

    /// Products in insertion order, `PAGE_SIZE` per page. Page 0 is page 1.
    fn list(&self, page: usize) -> ShopResult<Page<Product>>;

    /// Find a product by id
    fn get_by_id(&self, id: u64) -> ShopResult<Product>;

    /// Replace the whole catalog. Ids restart at 1 in input order.
    fn seed(&self, records: Vec<NewProduct>) -> ShopResult<Vec<Product>>;

    /// Number of stored products
    fn len(&self) -> ShopResult<usize>;

    fn is_empty(&self) -> ShopResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// `CatalogStore` kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    currency: Currency,
    products: RwLock<Vec<Product>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog priced in `currency`
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            products: RwLock::new(Vec::new()),
        }
    }

    /// Create a catalog and seed it in one step
    pub fn with_products(currency: Currency, records: Vec<NewProduct>) -> ShopResult<Self> {
        let catalog = Self::new(currency);
        catalog.seed(records)?;
        Ok(catalog)
    }
}

fn poisoned<E>(_: E) -> ShopError {
    ShopError::Internal("catalog lock poisoned".to_string())
}

impl CatalogStore for InMemoryCatalog {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn list(&self, page: usize) -> ShopResult<Page<Product>> {
        let page = page.max(1);
        let products = self.products.read().map_err(poisoned)?;

        let items = products
            .iter()
            .skip((page - 1).saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page,
            per_page: PAGE_SIZE,
            total: products.len(),
        })
    }

    fn get_by_id(&self, id: u64) -> ShopResult<Product> {
        let products = self.products.read().map_err(poisoned)?;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ShopError::not_found(id))
    }

    fn seed(&self, records: Vec<NewProduct>) -> ShopResult<Vec<Product>> {
        // Validate everything before touching the current contents
        for record in &records {
            record.validate()?;
        }

        let seeded: Vec<Product> = records
            .into_iter()
            .zip(1_u64..)
            .map(|(record, id)| record.into_product(id))
            .collect();

        let mut products = self.products.write().map_err(poisoned)?;
        let previous = products.len();
        *products = seeded.clone();

        info!(
            "Seeded catalog: {} products (replaced {})",
            seeded.len(),
            previous
        );

        Ok(seeded)
    }

    fn len(&self) -> ShopResult<usize> {
        Ok(self.products.read().map_err(poisoned)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn demo_records() -> Vec<NewProduct> {
        vec![
            NewProduct::new("Basic Plan", dec!(199)).with_description("One-time demo item"),
            NewProduct::new("Pro Plan", dec!(299)).with_description("Advanced demo item"),
            NewProduct::new("Platinum Plan", dec!(499)).with_description("Full demo item"),
        ]
    }

    fn numbered(n: usize) -> Vec<NewProduct> {
        (1..=n)
            .map(|i| NewProduct::new(format!("Item {}", i), Decimal::from(i as u64)))
            .collect()
    }

    #[test]
    fn test_list_returns_seeded_set() {
        let catalog = InMemoryCatalog::with_products(Currency::INR, demo_records()).unwrap();
        let page = catalog.list(1).unwrap();

        assert_eq!(page.total, 3);
        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Basic Plan", "Pro Plan", "Platinum Plan"]);
        assert!(page.items.iter().all(|p| p.price >= Decimal::ZERO));
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = InMemoryCatalog::with_products(Currency::INR, demo_records()).unwrap();

        let product = catalog.get_by_id(2).unwrap();
        assert_eq!(product.title, "Pro Plan");
        assert_eq!(product.price, dec!(299));

        let err = catalog.get_by_id(99).unwrap_err();
        assert!(matches!(err, ShopError::ProductNotFound { ref product_id } if product_id == "99"));
    }

    #[test]
    fn test_pagination() {
        let catalog = InMemoryCatalog::with_products(Currency::INR, numbered(20)).unwrap();

        let first = catalog.list(1).unwrap();
        assert_eq!(first.items.len(), PAGE_SIZE);
        assert_eq!(first.total_pages(), 3);
        assert!(first.has_next());

        let last = catalog.list(3).unwrap();
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.items[0].id, 19);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let beyond = catalog.list(10).unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total, 20);

        // Page 0 is clamped to the first page
        assert_eq!(catalog.list(0).unwrap().page, 1);
    }

    #[test]
    fn test_all_pages_cover_seed_exactly_once() {
        let catalog = InMemoryCatalog::with_products(Currency::INR, numbered(20)).unwrap();
        let total_pages = catalog.list(1).unwrap().total_pages();

        let ids: Vec<u64> = (1..=total_pages)
            .flat_map(|page| catalog.list(page).unwrap().items)
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
    }

    #[test]
    fn test_reseed_replaces_everything() {
        let catalog = InMemoryCatalog::with_products(Currency::INR, demo_records()).unwrap();

        let seeded = catalog
            .seed(vec![
                NewProduct::new("Starter", dec!(49)),
                NewProduct::new("Team", dec!(999)),
            ])
            .unwrap();

        assert_eq!(seeded.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(catalog.len().unwrap(), 2);
        assert_eq!(catalog.get_by_id(1).unwrap().title, "Starter");
        assert!(catalog.get_by_id(3).is_err());

        let titles: Vec<_> = catalog
            .list(1)
            .unwrap()
            .items
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Starter", "Team"]);
    }

    #[test]
    fn test_invalid_seed_keeps_previous_contents() {
        let catalog = InMemoryCatalog::with_products(Currency::INR, demo_records()).unwrap();

        let err = catalog
            .seed(vec![
                NewProduct::new("Fine", dec!(10)),
                NewProduct::new("Broken", dec!(-1)),
            ])
            .unwrap_err();

        assert!(matches!(err, ShopError::InvalidProduct(_)));
        assert_eq!(catalog.len().unwrap(), 3);
        assert_eq!(catalog.get_by_id(1).unwrap().title, "Basic Plan");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = InMemoryCatalog::new(Currency::INR);
        assert!(catalog.is_empty().unwrap());

        let page = catalog.list(1).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(), 0);
    }
}
