//! Placeholder products for vehicles with no real catalog match.
//!
//! Generated products are never written to a store. Their `_id` carries the
//! [`catalog::SYNTHETIC_ID_PREFIX`] so callers can tell them apart.

use catalog::{Product, ProductStatus, SYNTHETIC_ID_PREFIX};
use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{FallbackPolicy, MatchError};

/// Product types cycled through, in order, when generating placeholders.
pub const PRODUCT_TYPES: [&str; 8] = [
    "Navigație GPS Premium",
    "Sistem Multimedia Android",
    "Navigație Auto cu CarPlay",
    "Unitate Multimedia 4G",
    "Navigație cu Cameră Marșarier",
    "Sistem de Navigație Profesional",
    "Display Multimedia HD",
    "Navigație Android Auto",
];

pub const SYNTHETIC_CATEGORY: &str = "navigatii-gps";

const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/400x300";

static RE_SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Lowercase, transliterated, hyphen-separated form of `text`.
///
/// ```
/// assert_eq!(matcher::slugify("Navigație GPS Premium BMW X3"), "navigatie-gps-premium-bmw-x3");
/// ```
pub fn slugify(text: &str) -> String {
    let latin = deunicode(text).to_lowercase();
    RE_SLUG_SEPARATORS
        .replace_all(&latin, "-")
        .trim_matches('-')
        .to_string()
}

fn placeholder_image(product_type: &str) -> String {
    let text: String = url::form_urlencoded::byte_serialize(product_type.as_bytes()).collect();
    format!("{PLACEHOLDER_IMAGE_BASE}?text={text}")
}

/// Generate between `policy.min_products` and `policy.max_products`
/// placeholder products for `brand`/`model`, drawing every random value from
/// `rng`.
///
/// Returns [`MatchError::InvalidConfig`] when `policy` fails
/// [`FallbackPolicy::validate`].
pub fn synthesize_products(
    brand: &str,
    model: &str,
    policy: &FallbackPolicy,
    rng: &mut fastrand::Rng,
) -> Result<Vec<Product>, MatchError> {
    policy.validate()?;
    let count = rng.usize(policy.min_products..=policy.max_products);
    Ok((1..=count)
        .map(|index| synthesize_one(brand, model, index, rng))
        .collect())
}

fn synthesize_one(brand: &str, model: &str, index: usize, rng: &mut fastrand::Rng) -> Product {
    let product_type = PRODUCT_TYPES[(index - 1) % PRODUCT_TYPES.len()];
    let price = f64::from(rng.u32(299..=1299));
    let markup = f64::from(rng.u32(100..=400));
    let rating = ((4.0 + rng.f64()) * 10.0).round() / 10.0;

    Product {
        id: format!("{SYNTHETIC_ID_PREFIX}{brand}-{model}-{index}"),
        name: format!("{product_type} {brand} {model}"),
        slug: slugify(&format!("{product_type} {brand} {model} {index}")),
        brand: brand.to_string(),
        status: ProductStatus::Active,
        price,
        original_price: Some(price + markup),
        images: vec![placeholder_image(product_type)],
        category: SYNTHETIC_CATEGORY.to_string(),
        description: format!(
            "{product_type} compatibilă cu {brand} {model}. \
             Include hărți actualizate și suport tehnic."
        ),
        average_rating: rating,
        total_reviews: rng.u32(5..=54),
        stock: rng.u32(1..=20),
        featured: rng.f64() < 0.3,
    }
}
