use serde::{Deserialize, Serialize};

/// Identifier prefix reserved for placeholder products that never live in a store.
pub const SYNTHETIC_ID_PREFIX: &str = "mock-";

/// Publication status of a catalog entry. Only `Active` products are shown
/// to customers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
    #[default]
    Draft,
}

/// A catalog product as stored in the document export.
///
/// Field names follow the storefront's camelCase JSON so exported documents
/// deserialize without a mapping layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub brand: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Minimal draft product; the id defaults to the slug.
    pub fn new(slug: impl Into<String>, name: impl Into<String>, brand: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            id: slug.clone(),
            name: name.into(),
            slug,
            brand: brand.into(),
            status: ProductStatus::Draft,
            price: 0.0,
            original_price: None,
            images: Vec::new(),
            category: String::new(),
            description: String::new(),
            average_rating: 0.0,
            total_reviews: 0,
            stock: 0,
            featured: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// True for placeholder products generated at request time.
    pub fn is_synthetic(&self) -> bool {
        self.id.starts_with(SYNTHETIC_ID_PREFIX)
    }
}

/// One row of the brand listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrandSummary {
    pub brand: String,
    pub product_count: usize,
}
