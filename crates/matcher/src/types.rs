use catalog::{CatalogError, Product};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed installation/warranty metadata attached to every match result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specifications {
    pub compatibility: String,
    pub installation: String,
    pub warranty: String,
}

impl Specifications {
    pub fn for_vehicle(brand: &str, model: &str) -> Self {
        Self {
            compatibility: format!("{brand} {model}"),
            installation: "Professional installation recommended".to_string(),
            warranty: "2 years".to_string(),
        }
    }
}

/// Products judged compatible with one brand/model pair.
///
/// Built fresh for every request and never persisted. `total_products` always
/// equals `products.len()`; construct through [`ModelMatchResult::new`] to keep
/// it that way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelMatchResult {
    pub brand: String,
    pub model: String,
    pub description: String,
    pub products: Vec<Product>,
    pub total_products: usize,
    pub specifications: Specifications,
}

impl ModelMatchResult {
    pub fn new(brand: &str, model: &str, products: Vec<Product>) -> Self {
        Self {
            brand: brand.to_string(),
            model: model.to_string(),
            description: format!(
                "Sisteme de navigație și multimedia compatibile cu {brand} {model}. \
                 Navigation and multimedia systems compatible with {brand} {model}."
            ),
            total_products: products.len(),
            products,
            specifications: Specifications::for_vehicle(brand, model),
        }
    }

    /// True when every returned product is a generated placeholder.
    pub fn is_synthetic(&self) -> bool {
        !self.products.is_empty() && self.products.iter().all(Product::is_synthetic)
    }
}

/// Which branch produced a result; reported to [`crate::MatchMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    /// Real catalog products matched.
    Real,
    /// Nothing matched; placeholders were generated.
    Synthetic,
    /// Nothing matched and the fallback was suppressed.
    Empty,
}

impl MatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOutcome::Real => "real",
            MatchOutcome::Synthetic => "synthetic",
            MatchOutcome::Empty => "empty",
        }
    }
}

/// Controls the placeholder products returned when no real product matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FallbackPolicy {
    /// Generate placeholders at all.
    #[serde(default = "FallbackPolicy::default_enabled")]
    pub enabled: bool,
    /// Inclusive lower bound on the number of placeholders.
    #[serde(default = "FallbackPolicy::default_min_products")]
    pub min_products: usize,
    /// Inclusive upper bound on the number of placeholders.
    #[serde(default = "FallbackPolicy::default_max_products")]
    pub max_products: usize,
    /// Skip placeholders when the catalog has no active product for the brand.
    #[serde(default)]
    pub require_known_brand: bool,
}

impl FallbackPolicy {
    pub(crate) fn default_enabled() -> bool {
        true
    }

    pub(crate) fn default_min_products() -> usize {
        3
    }

    pub(crate) fn default_max_products() -> usize {
        8
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.min_products == 0 {
            return Err(MatchError::InvalidConfig(
                "fallback.min_products must be at least 1".into(),
            ));
        }
        if self.min_products > self.max_products {
            return Err(MatchError::InvalidConfig(
                "fallback.min_products must not exceed fallback.max_products".into(),
            ));
        }
        if self.max_products > 100 {
            return Err(MatchError::InvalidConfig(
                "fallback.max_products must be at most 100".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            min_products: Self::default_min_products(),
            max_products: Self::default_max_products(),
            require_known_brand: false,
        }
    }
}

/// Matcher-wide configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatcherConfig {
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        self.fallback.validate()
    }
}

/// Errors produced by the matcher.
///
/// Finding nothing is not an error: it yields a valid (possibly synthetic)
/// result.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Brand or model missing, blank, or unusable as a pattern.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The catalog read failed; surfaced unchanged, never retried.
    #[error(transparent)]
    CatalogUnavailable(#[from] CatalogError),
    /// Invalid matcher configuration.
    #[error("invalid matcher config: {0}")]
    InvalidConfig(String),
}
