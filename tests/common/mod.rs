//! Shared catalog fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use navcompat::{CompatibilityMatcher, InMemoryCatalog, Product, ProductStatus};

pub fn active(slug: &str, name: &str, brand: &str) -> Product {
    let mut product = Product::new(slug, name, brand);
    product.status = ProductStatus::Active;
    product.price = 999.0;
    product.category = "navigatii-gps".into();
    product
}

/// A small storefront catalog with a few traps: near-miss model numbers,
/// multi-word brands and a product whose name omits its brand.
pub fn storefront() -> Vec<Product> {
    vec![
        active("bmw-x3-e83", "Navigatie PilotOn BMW X3 E83 Android", "BMW"),
        active("bmw-x30-concept", "Navigatie BMW X30 Concept", "BMW"),
        active("bmw-x5-e70", "Navigatie BMW X5 E70 CarPlay", "BMW"),
        active("bmw-e83-x3-reversed", "Navigatie BMW E83 X3 Reversed", "BMW"),
        active("vw-golf-8", "Navigatie VW Golf 8 Android 12", "VW"),
        active("vw-golf-80", "Navigatie VW Golf 80 Retro", "VW"),
        active("alfa-159", "Navigatie Alfa Romeo 159 Android", "Alfa Romeo"),
        active("mercedes-c-w205", "Navigatie Mercedes C-Class W205", "Mercedes-Benz"),
        active("generic-x3-unit", "Unitate multimedia X3 universala", "BMW"),
        {
            let mut draft = active("bmw-x3-draft", "Navigatie BMW X3 E83 Draft", "BMW");
            draft.status = ProductStatus::Draft;
            draft
        },
    ]
}

pub fn storefront_matcher() -> CompatibilityMatcher {
    let store = InMemoryCatalog::with_products(storefront()).expect("fixture products are valid");
    CompatibilityMatcher::with_defaults(Arc::new(store))
}

pub fn slugs(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.slug.as_str()).collect()
}
