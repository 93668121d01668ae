use crate::{
    brand_matches, summarize_brands, validate_record, BrandSummary, CatalogError, CatalogStore,
    Product,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Configuration for selecting and building a catalog store.
///
/// # Example
/// ```
/// use catalog::BackendConfig;
///
/// // In-memory (tests, JSON-seeded deployments)
/// let config = BackendConfig::in_memory();
///
/// // Redb file on disk
/// let config = BackendConfig::redb("/data/catalog.redb");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BackendConfig {
    /// Persistent redb database at `path`.
    ///
    /// Requires the `backend-redb` feature (enabled by default).
    Redb { path: String },
    /// Process-local map; contents vanish with the process.
    #[default]
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn redb<P: Into<String>>(path: P) -> Self {
        BackendConfig::Redb { path: path.into() }
    }

    /// Build the store described by this configuration.
    pub fn build(&self) -> Result<Arc<dyn CatalogStore>, CatalogError> {
        match self {
            BackendConfig::InMemory => Ok(Arc::new(InMemoryCatalog::new())),
            BackendConfig::Redb { path } => {
                #[cfg(feature = "backend-redb")]
                {
                    Ok(Arc::new(RedbCatalog::open(path)?))
                }
                #[cfg(not(feature = "backend-redb"))]
                {
                    let _ = path;
                    Err(CatalogError::unavailable(
                        "redb backend disabled at compile time",
                    ))
                }
            }
        }
    }
}

/// An in-memory catalog: slug-ordered map behind a `RwLock`.
pub struct InMemoryCatalog {
    products: RwLock<BTreeMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(BTreeMap::new()),
        }
    }

    /// Build a store pre-populated with `products`; later duplicates of a slug win.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let store = Self::new();
        {
            let mut guard = store
                .products
                .write()
                .map_err(|_| CatalogError::unavailable("poisoned lock"))?;
            for product in products {
                validate_record(&product)?;
                guard.insert(product.slug.clone(), product);
            }
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_active_products_by_brand(
        &self,
        brand: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let guard = self
            .products
            .read()
            .map_err(|_| CatalogError::unavailable("poisoned lock"))?;
        Ok(guard
            .values()
            .filter(|p| p.is_active() && brand_matches(&p.brand, brand))
            .cloned()
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let guard = self
            .products
            .read()
            .map_err(|_| CatalogError::unavailable("poisoned lock"))?;
        Ok(guard.get(slug).cloned())
    }

    async fn list_brands(&self) -> Result<Vec<BrandSummary>, CatalogError> {
        let guard = self
            .products
            .read()
            .map_err(|_| CatalogError::unavailable("poisoned lock"))?;
        Ok(summarize_brands(guard.values()))
    }

    async fn upsert(&self, product: Product) -> Result<(), CatalogError> {
        validate_record(&product)?;
        self.products
            .write()
            .map_err(|_| CatalogError::unavailable("poisoned lock"))?
            .insert(product.slug.clone(), product);
        Ok(())
    }

    async fn upsert_many(&self, products: Vec<Product>) -> Result<(), CatalogError> {
        for product in &products {
            validate_record(product)?;
        }
        // One write lock for the whole batch.
        let mut guard = self
            .products
            .write()
            .map_err(|_| CatalogError::unavailable("poisoned lock"))?;
        for product in products {
            guard.insert(product.slug.clone(), product);
        }
        Ok(())
    }
}

#[cfg(feature = "backend-redb")]
pub mod redb;

#[cfg(feature = "backend-redb")]
pub use self::redb::RedbCatalog;
