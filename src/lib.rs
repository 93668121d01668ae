//! Umbrella crate for navcompat, the vehicle-compatibility lookup behind a
//! navigation-systems storefront.
//!
//! This crate stitches the catalog stores and the compatibility matcher
//! together behind one configuration file so callers (the CLI, the HTTP
//! server, tests) can go from a YAML path to a ready matcher in one call.

pub mod config;

pub use catalog::{
    BackendConfig, BrandSummary, CatalogError, CatalogStore, ImportReport, InMemoryCatalog,
    Product, ProductStatus, backfill_by_slug, brand_matches, load_blobs_json, load_products_json,
};
pub use config::{CatalogBackendKind, CatalogYamlConfig, ConfigLoadError, NavcompatConfig};
pub use matcher::{
    CompatibilityMatcher, FallbackPolicy, MatchError, MatchMetrics, MatchOutcome, MatcherConfig,
    ModelMatchResult, Specifications, set_match_metrics, tokenize_model,
};

use std::sync::Arc;

use thiserror::Error;

/// Errors raised while assembling the catalog and matcher from configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Open the configured catalog store and apply the optional seed file.
pub async fn open_catalog(cfg: &CatalogYamlConfig) -> Result<Arc<dyn CatalogStore>, SetupError> {
    let store = cfg.backend_config().build()?;

    if let Some(seed_file) = cfg.seed_file.as_deref() {
        let products = load_products_json(seed_file)?;
        let count = products.len();
        store.upsert_many(products).await?;
        tracing::info!(seed_file, count, "seeded catalog");
    }

    Ok(store)
}

/// Build a matcher over `store` using the matcher section of `cfg`.
pub fn build_matcher(
    cfg: &NavcompatConfig,
    store: Arc<dyn CatalogStore>,
) -> Result<CompatibilityMatcher, SetupError> {
    Ok(CompatibilityMatcher::new(store, cfg.matcher.clone())?)
}

/// Open the catalog and build the matcher in one step.
pub async fn matcher_from_config(cfg: &NavcompatConfig) -> Result<CompatibilityMatcher, SetupError> {
    let store = open_catalog(&cfg.catalog).await?;
    build_matcher(cfg, store)
}

/// Convenience helper: run one lookup against an in-memory catalog built from
/// `products`, with the default fallback policy.
pub async fn match_in_products(
    products: Vec<Product>,
    brand: &str,
    model: &str,
) -> Result<ModelMatchResult, SetupError> {
    let store = InMemoryCatalog::with_products(products)?;
    let matcher = CompatibilityMatcher::with_defaults(Arc::new(store));
    Ok(matcher.match_vehicle_model(brand, model).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn seed_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
  {{"_id": "1", "name": "Navigatie PilotOn BMW X3 E83 Android", "slug": "bmw-x3-e83", "brand": "BMW", "status": "active", "price": 899}},
  {{"_id": "2", "name": "Navigatie Audi A4 B8", "slug": "audi-a4-b8", "brand": "Audi", "status": "inactive", "price": 799}}
]"#
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn open_catalog_seeds_memory_store() {
        let file = seed_file();
        let cfg = CatalogYamlConfig {
            seed_file: Some(file.path().to_string_lossy().into_owned()),
            ..CatalogYamlConfig::default()
        };

        let store = open_catalog(&cfg).await.unwrap();
        assert!(store.find_by_slug("audi-a4-b8").await.unwrap().is_some());
        assert_eq!(store.list_brands().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn matcher_from_config_finds_seeded_product() {
        let file = seed_file();
        let mut cfg = NavcompatConfig::default();
        cfg.catalog.seed_file = Some(file.path().to_string_lossy().into_owned());

        let matcher = matcher_from_config(&cfg).await.unwrap();
        let result = matcher.match_vehicle_model("BMW", "X3 E83").await.unwrap();
        assert_eq!(result.total_products, 1);
        assert_eq!(result.products[0].slug, "bmw-x3-e83");
    }

    #[tokio::test]
    async fn missing_seed_file_is_a_catalog_error() {
        let cfg = CatalogYamlConfig {
            seed_file: Some("/no/such/catalog.json".into()),
            ..CatalogYamlConfig::default()
        };
        let err = open_catalog(&cfg).await.err().expect("seed file is missing");
        assert!(matches!(err, SetupError::Catalog(CatalogError::Unavailable(_))));
    }

    #[tokio::test]
    async fn match_in_products_wraps_default_matcher() {
        let mut product = Product::new("golf-8", "Navigatie VW Golf 8", "VW");
        product.status = ProductStatus::Active;

        let result = match_in_products(vec![product], "VW", "Golf 8").await.unwrap();
        assert_eq!(result.total_products, 1);
    }
}
