//! Redb-backed catalog store.
//!
//! One table maps slug → product JSON. redb transactions are blocking, so
//! every operation hops onto tokio's blocking pool; reads use MVCC snapshots
//! and never wait on a concurrent writer.
//!
//! # Configuration Example
//! ```yaml
//! catalog:
//!   backend: "redb"
//!   redb_path: "/data/catalog.redb"
//! ```

use crate::{
    brand_matches, summarize_brands, validate_record, BrandSummary, CatalogError, CatalogStore,
    Product,
};
use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const PRODUCTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("products");

fn backend_err(err: impl std::fmt::Display) -> CatalogError {
    CatalogError::Unavailable(err.to_string())
}

/// Persistent catalog backed by a single redb file.
///
/// Cloning the handle is cheap; all clones share the same database.
#[derive(Clone)]
pub struct RedbCatalog {
    db: Arc<Database>,
}

impl RedbCatalog {
    /// Open or create a catalog database at `path`.
    ///
    /// ```no_run
    /// use catalog::RedbCatalog;
    ///
    /// let store = RedbCatalog::open("/tmp/catalog.redb").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let db = Database::create(path).map_err(backend_err)?;

        let write_txn = db.begin_write().map_err(backend_err)?;
        {
            // Opening the table inside a write transaction creates it.
            let _table = write_txn.open_table(PRODUCTS_TABLE).map_err(backend_err)?;
        }
        write_txn.commit().map_err(backend_err)?;

        Ok(Self { db: Arc::new(db) })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, CatalogError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, CatalogError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db))
            .await
            .map_err(|e| CatalogError::unavailable(format!("catalog task failed: {e}")))?
    }

    fn scan(db: &Database) -> Result<Vec<Product>, CatalogError> {
        let read_txn = db.begin_read().map_err(backend_err)?;
        let table = read_txn.open_table(PRODUCTS_TABLE).map_err(backend_err)?;

        let mut products = Vec::new();
        for item in table.iter().map_err(backend_err)? {
            let (_, value) = item.map_err(backend_err)?;
            products.push(serde_json::from_slice::<Product>(value.value())?);
        }
        Ok(products)
    }

    fn write_all(db: &Database, products: &[Product]) -> Result<(), CatalogError> {
        let mut encoded = Vec::with_capacity(products.len());
        for product in products {
            validate_record(product)?;
            encoded.push((product.slug.as_str(), serde_json::to_vec(product)?));
        }

        let write_txn = db.begin_write().map_err(backend_err)?;
        {
            let mut table = write_txn.open_table(PRODUCTS_TABLE).map_err(backend_err)?;
            for (slug, bytes) in &encoded {
                table.insert(*slug, bytes.as_slice()).map_err(backend_err)?;
            }
        }
        write_txn.commit().map_err(backend_err)?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for RedbCatalog {
    async fn find_active_products_by_brand(
        &self,
        brand: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let brand = brand.to_string();
        self.blocking(move |db| {
            Ok(Self::scan(db)?
                .into_iter()
                .filter(|p| p.is_active() && brand_matches(&p.brand, &brand))
                .collect())
        })
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let slug = slug.to_string();
        self.blocking(move |db| {
            let read_txn = db.begin_read().map_err(backend_err)?;
            let table = read_txn.open_table(PRODUCTS_TABLE).map_err(backend_err)?;
            let product = match table.get(slug.as_str()).map_err(backend_err)? {
                Some(value) => Some(serde_json::from_slice(value.value())?),
                None => None,
            };
            Ok(product)
        })
        .await
    }

    async fn list_brands(&self) -> Result<Vec<BrandSummary>, CatalogError> {
        self.blocking(|db| Ok(summarize_brands(Self::scan(db)?.iter())))
            .await
    }

    async fn upsert(&self, product: Product) -> Result<(), CatalogError> {
        self.blocking(move |db| Self::write_all(db, std::slice::from_ref(&product)))
            .await
    }

    async fn upsert_many(&self, products: Vec<Product>) -> Result<(), CatalogError> {
        self.blocking(move |db| Self::write_all(db, &products)).await
    }

    async fn health(&self) -> Result<(), CatalogError> {
        self.blocking(|db| {
            let read_txn = db.begin_read().map_err(backend_err)?;
            read_txn.open_table(PRODUCTS_TABLE).map_err(backend_err)?;
            Ok(())
        })
        .await
    }
}
