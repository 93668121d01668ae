//! # navcompat matcher (`matcher`)
//!
//! ## Purpose
//!
//! Given a vehicle brand and model, decide which active catalog products are
//! compatible with that vehicle. Matching is heuristic string work over
//! product names: no scores, no ranking, the catalog's order is kept.
//!
//! ## How a lookup runs
//!
//! 1. Fetch every active product whose brand contains the requested brand
//!    ([`catalog::CatalogStore::find_active_products_by_brand`]).
//! 2. Keep products whose *name* mentions the brand, tolerating whitespace
//!    drift ("Alfa Romeo" vs "AlfaRomeo").
//! 3. Tokenize the model ([`tokenize_model`]) and compile one
//!    [`ModelPattern`] for the request. A name qualifies if every token occurs
//!    as a whole word, or, for multi-token models, the tokens occur
//!    contiguously in order.
//! 4. If nothing qualifies, generate placeholder products
//!    ([`synthesize_products`]) according to the [`FallbackPolicy`].
//!
//! Failures of the catalog read are the only hard errors and are surfaced as
//! [`MatchError::CatalogUnavailable`] without retries.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use catalog::{InMemoryCatalog, Product, ProductStatus};
//! use matcher::CompatibilityMatcher;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut product = Product::new("x3-e83", "Navigatie PilotOn BMW X3 E83 Android", "BMW");
//! product.status = ProductStatus::Active;
//! let store = InMemoryCatalog::with_products([product]).unwrap();
//!
//! let matcher = CompatibilityMatcher::with_defaults(Arc::new(store));
//! let result = matcher.match_vehicle_model("BMW", "X3 E83").await.unwrap();
//! assert_eq!(result.total_products, 1);
//! # });
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to
//! record per-lookup latency and outcome.

pub mod engine;
pub mod metrics;
pub mod pattern;
pub mod synthetic;
pub mod tokenize;
pub mod types;

pub use crate::engine::{select_compatible, CompatibilityMatcher};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::pattern::{ModelPattern, TokenPattern};
pub use crate::synthetic::{slugify, synthesize_products, PRODUCT_TYPES, SYNTHETIC_CATEGORY};
pub use crate::tokenize::{clean_model, tokenize_model};
pub use crate::types::{
    FallbackPolicy, MatchError, MatchOutcome, MatcherConfig, ModelMatchResult, Specifications,
};
