use std::sync::Arc;
use std::time::Instant;

use catalog::{brand_matches, CatalogStore, Product};

use crate::metrics::metrics_recorder;
use crate::pattern::ModelPattern;
use crate::synthetic::synthesize_products;
use crate::tokenize::tokenize_model;
use crate::types::{MatchError, MatchOutcome, MatcherConfig, ModelMatchResult};


/// Finds catalog products compatible with a vehicle brand and model.
///
/// Holds only a shared read handle to the catalog; concurrent lookups are
/// independent and never write.
pub struct CompatibilityMatcher {
    store: Arc<dyn CatalogStore>,
    config: MatcherConfig,
}

impl CompatibilityMatcher {
    /// Construct a matcher over `store` with an explicit, validated config.
    pub fn new(store: Arc<dyn CatalogStore>, config: MatcherConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Construct a matcher with the default fallback policy.
    pub fn with_defaults(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            config: MatcherConfig::default(),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Look up products compatible with `brand` / `model`, drawing any
    /// placeholder values from a freshly seeded generator.
    pub async fn match_vehicle_model(
        &self,
        brand: &str,
        model: &str,
    ) -> Result<ModelMatchResult, MatchError> {
        let mut rng = fastrand::Rng::new();
        self.match_vehicle_model_with_rng(brand, model, &mut rng)
            .await
    }

    /// As [`match_vehicle_model`](Self::match_vehicle_model), with the
    /// generator for the placeholder branch supplied by the caller.
    pub async fn match_vehicle_model_with_rng(
        &self,
        brand: &str,
        model: &str,
        rng: &mut fastrand::Rng,
    ) -> Result<ModelMatchResult, MatchError> {
        let brand = brand.trim();
        let model = model.trim();
        if brand.is_empty() {
            return Err(MatchError::InvalidInput("brand must not be empty".into()));
        }
        if model.is_empty() {
            return Err(MatchError::InvalidInput("model must not be empty".into()));
        }

        let started = Instant::now();
        let tokens = tokenize_model(model);
        let pattern = ModelPattern::compile(&tokens)?;

        let brand_products = self.store.find_active_products_by_brand(brand).await?;
        let brand_product_count = brand_products.len();
        let matches = select_compatible(brand_products, brand, &pattern);

        tracing::debug!(
            brand,
            model,
            tokens = ?tokens,
            brand_products = brand_product_count,
            matches = matches.len(),
            "model filter applied"
        );

        let (products, outcome) = if !matches.is_empty() {
            (matches, MatchOutcome::Real)
        } else if self.fallback_allowed(brand_product_count) {
            tracing::info!(brand, model, "no compatible products, generating placeholders");
            let synthetic = synthesize_products(brand, model, &self.config.fallback, rng)?;
            (synthetic, MatchOutcome::Synthetic)
        } else {
            (Vec::new(), MatchOutcome::Empty)
        };

        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(brand, outcome, started.elapsed(), products.len());
        }

        Ok(ModelMatchResult::new(brand, model, products))
    }

    fn fallback_allowed(&self, brand_product_count: usize) -> bool {
        let policy = &self.config.fallback;
        policy.enabled && (brand_product_count > 0 || !policy.require_known_brand)
    }
}

/// Keep the candidates whose name mentions `brand` and satisfies `pattern`,
/// preserving candidate order.
pub fn select_compatible(
    candidates: Vec<Product>,
    brand: &str,
    pattern: &ModelPattern,
) -> Vec<Product> {
    candidates
        .into_iter()
        .filter(|product| brand_matches(&product.name, brand) && pattern.is_match(&product.name))
        .collect()
}
