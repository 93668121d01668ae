//! # navcompat catalog
//!
//! Read-mostly product catalog behind the storefront. The matcher and the HTTP
//! layer only ever talk to a [`CatalogStore`]; which backend sits behind it is
//! a runtime decision made through [`BackendConfig`].
//!
//! ## Backends
//!
//! - [`InMemoryCatalog`]: a `BTreeMap` keyed by slug behind an `RwLock`. Used
//!   by tests and by deployments that seed from a JSON export at startup.
//! - `RedbCatalog`: persistent single-file store (feature `backend-redb`,
//!   enabled by default). Products are kept as JSON documents keyed by slug.
//!
//! Both backends return query results in ascending slug order, so repeated
//! calls against an unchanged catalog yield identical sequences.
//!
//! ## Example
//!
//! ```
//! use catalog::{BackendConfig, Product, ProductStatus};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = BackendConfig::in_memory().build().unwrap();
//! let mut product = Product::new("nav-bmw-x3", "Navigatie BMW X3 E83", "BMW");
//! product.status = ProductStatus::Active;
//! store.upsert(product).await.unwrap();
//!
//! let hits = store.find_active_products_by_brand("bmw").await.unwrap();
//! assert_eq!(hits.len(), 1);
//! # });
//! ```

mod backend;
pub mod import;
mod product;

pub use backend::{BackendConfig, InMemoryCatalog};
#[cfg(feature = "backend-redb")]
pub use backend::RedbCatalog;
pub use import::{backfill_by_slug, load_blobs_json, load_products_json, ImportReport};
pub use product::{BrandSummary, Product, ProductStatus, SYNTHETIC_ID_PREFIX};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by catalog stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The backing store could not be reached or a transaction failed.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    /// A stored or supplied document could not be (de)serialized.
    #[error("catalog serialization error: {0}")]
    Serialization(String),
    /// A record violates a catalog invariant (e.g. empty slug).
    #[error("invalid catalog record: {0}")]
    InvalidRecord(String),
}

impl CatalogError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        CatalogError::Unavailable(msg.into())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Unavailable(format!("io error: {err}"))
    }
}

/// Query and write capability the rest of the system needs from the catalog.
///
/// Read methods must return empty collections, not errors, when nothing
/// matches. Errors are reserved for the store itself failing.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All active products whose `brand` contains `brand`, compared with
    /// [`brand_matches`].
    async fn find_active_products_by_brand(&self, brand: &str)
        -> Result<Vec<Product>, CatalogError>;

    /// Look up a single product by slug regardless of status.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError>;

    /// Distinct brands across active products with their product counts.
    async fn list_brands(&self) -> Result<Vec<BrandSummary>, CatalogError>;

    /// Insert or replace a product keyed by its slug.
    async fn upsert(&self, product: Product) -> Result<(), CatalogError>;

    /// Insert or replace several products in one write.
    async fn upsert_many(&self, products: Vec<Product>) -> Result<(), CatalogError> {
        for product in products {
            self.upsert(product).await?;
        }
        Ok(())
    }

    /// Readiness probe.
    async fn health(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// Case-insensitive substring test that also tolerates whitespace drift
/// ("Alfa Romeo" vs "AlfaRomeo") on either side.
///
/// The whitespace-free comparison only accepts hits that begin at a word
/// start in `haystack`, so "Aro" does not match inside "Alfa Romeo".
/// An empty or all-whitespace `needle` never matches.
pub fn brand_matches(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    if haystack.contains(&needle) {
        return true;
    }

    let needle: Vec<char> = needle.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact_with_word_starts(&haystack);
    compact.len() >= needle.len()
        && compact.windows(needle.len()).any(|window| {
            window[0].1 && window.iter().map(|(c, _)| c).eq(needle.iter())
        })
}

/// Non-whitespace chars of `text`, each flagged with whether it starts a word
/// in the original text.
fn compact_with_word_starts(text: &str) -> Vec<(char, bool)> {
    let mut out = Vec::with_capacity(text.len());
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if !c.is_whitespace() {
            let word_start = prev.is_none_or(|p| !p.is_alphanumeric());
            out.push((c, word_start));
        }
        prev = Some(c);
    }
    out
}

/// Validates that a product can be stored: slug and name must be non-blank.
pub(crate) fn validate_record(product: &Product) -> Result<(), CatalogError> {
    if product.slug.trim().is_empty() {
        return Err(CatalogError::InvalidRecord("slug must not be empty".into()));
    }
    if product.name.trim().is_empty() {
        return Err(CatalogError::InvalidRecord(format!(
            "product '{}' has an empty name",
            product.slug
        )));
    }
    Ok(())
}

/// Folds active products into per-brand counts, sorted case-insensitively.
pub(crate) fn summarize_brands<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<BrandSummary> {
    let mut counts: std::collections::BTreeMap<String, BrandSummary> = Default::default();
    for product in products.filter(|p| p.is_active()) {
        let brand = product.brand.trim();
        if brand.is_empty() {
            continue;
        }
        counts
            .entry(brand.to_lowercase())
            .or_insert_with(|| BrandSummary {
                brand: brand.to_string(),
                product_count: 0,
            })
            .product_count += 1;
    }
    counts.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_matches_is_case_insensitive() {
        assert!(brand_matches("BMW", "bmw"));
        assert!(brand_matches("bmw", "BMW"));
        assert!(brand_matches("Navigatie BMW X3", "Bmw"));
    }

    #[test]
    fn brand_matches_tolerates_whitespace_drift() {
        assert!(brand_matches("Alfa Romeo", "Alfa"));
        assert!(brand_matches("Alfa Romeo", "AlfaRomeo"));
        assert!(brand_matches("Navigatie AlfaRomeo Giulia", "Alfa Romeo"));
        assert!(!brand_matches("Audi", "Alfa"));
    }

    #[test]
    fn compacted_match_must_start_at_a_word() {
        assert!(!brand_matches("Alfa Romeo", "Aro"));
        assert!(!brand_matches("Navigatie Alfa Romeo 159", "Aro"));
        assert!(!brand_matches("Alfa Romeo", "faRo"));
        assert!(brand_matches("ARO", "Aro"));
        assert!(brand_matches("Navigatie Land Rover Defender", "LandRover"));
        assert!(brand_matches("Land Rover", "Rover"));
    }

    #[test]
    fn blank_needle_never_matches() {
        assert!(!brand_matches("BMW", ""));
        assert!(!brand_matches("BMW", "   "));
    }

    #[test]
    fn summarize_brands_counts_active_only() {
        let mut a = Product::new("a", "Nav A", "BMW");
        a.status = ProductStatus::Active;
        let mut b = Product::new("b", "Nav B", "bmw");
        b.status = ProductStatus::Active;
        let c = Product::new("c", "Nav C", "Audi");

        let summary = summarize_brands([a, b, c].iter());
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].brand, "BMW");
        assert_eq!(summary[0].product_count, 2);
    }
}
