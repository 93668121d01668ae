//! JSON import and slug-keyed backfill.
//!
//! Catalog exports arrive as JSON arrays of product documents. Full documents
//! seed a store directly; partial blobs (a slug plus the fields to patch) are
//! merged onto whatever the store already holds under that slug.

use crate::{CatalogError, CatalogStore, Product};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Outcome of a [`backfill_by_slug`] run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    /// Slugs (or `"<missing slug>"`) of blobs that were not applied.
    pub skipped: Vec<String>,
}

const MISSING_SLUG: &str = "<missing slug>";

/// Read a JSON array of complete product documents.
pub fn load_products_json<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, CatalogError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read a JSON array of arbitrary blobs for [`backfill_by_slug`].
pub fn load_blobs_json<P: AsRef<Path>>(path: P) -> Result<Vec<Value>, CatalogError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Apply `blobs` to `store`, matching documents by their `slug` field.
///
/// Existing documents get the blob's top-level fields laid over them (the slug
/// itself never changes). Unknown slugs are created only when the blob is a
/// complete product. Anything that fails to validate is skipped and reported;
/// store failures abort the run.
pub async fn backfill_by_slug(
    store: &dyn CatalogStore,
    blobs: Vec<Value>,
) -> Result<ImportReport, CatalogError> {
    let mut report = ImportReport::default();

    for blob in blobs {
        let Some(fields) = blob.as_object() else {
            report.skipped.push(MISSING_SLUG.to_string());
            continue;
        };
        let Some(slug) = fields
            .get("slug")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
        else {
            report.skipped.push(MISSING_SLUG.to_string());
            continue;
        };

        match store.find_by_slug(&slug).await? {
            Some(existing) => match merge_onto(&existing, fields) {
                Ok(merged) => {
                    store.upsert(merged).await?;
                    report.updated += 1;
                }
                Err(err) => {
                    tracing::warn!(slug = %slug, error = %err, "skipping unmergeable blob");
                    report.skipped.push(slug);
                }
            },
            None => match serde_json::from_value::<Product>(blob.clone()) {
                Ok(mut product) if !product.name.trim().is_empty() => {
                    // Stored under the same key the lookup above used.
                    product.slug = slug;
                    store.upsert(product).await?;
                    report.created += 1;
                }
                _ => {
                    tracing::debug!(slug = %slug, "no stored product and blob is incomplete");
                    report.skipped.push(slug);
                }
            },
        }
    }

    tracing::info!(
        created = report.created,
        updated = report.updated,
        skipped = report.skipped.len(),
        "catalog backfill finished"
    );
    Ok(report)
}

fn merge_onto(existing: &Product, patch: &Map<String, Value>) -> Result<Product, CatalogError> {
    let mut document = serde_json::to_value(existing)?;
    if let Value::Object(target) = &mut document {
        for (key, value) in patch {
            if key == "slug" {
                continue;
            }
            target.insert(key.clone(), value.clone());
        }
    }
    let merged: Product = serde_json::from_value(document)?;
    if merged.name.trim().is_empty() {
        return Err(CatalogError::InvalidRecord(format!(
            "merge would blank the name of '{}'",
            existing.slug
        )));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryCatalog, ProductStatus};
    use serde_json::json;
    use std::io::Write;

    fn seeded() -> InMemoryCatalog {
        let mut product = Product::new("nav-bmw-x3", "Navigatie BMW X3", "BMW");
        product.status = ProductStatus::Active;
        product.price = 899.0;
        InMemoryCatalog::with_products([product]).unwrap()
    }

    #[tokio::test]
    async fn backfill_merges_fields_onto_existing_slug() {
        let store = seeded();
        let report = backfill_by_slug(
            &store,
            vec![json!({
                "slug": "nav-bmw-x3",
                "images": ["/uploads/x3-front.jpg"],
                "stock": 7
            })],
        )
        .await
        .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.created, 0);
        let product = store.find_by_slug("nav-bmw-x3").await.unwrap().unwrap();
        assert_eq!(product.images, vec!["/uploads/x3-front.jpg".to_string()]);
        assert_eq!(product.stock, 7);
        assert_eq!(product.price, 899.0);
        assert!(product.is_active());
    }

    #[tokio::test]
    async fn backfill_creates_complete_products_only() {
        let store = seeded();
        let report = backfill_by_slug(
            &store,
            vec![
                json!({"_id": "2", "slug": "nav-audi-a4", "name": "Navigatie Audi A4", "brand": "Audi"}),
                json!({"slug": "nav-unknown", "stock": 3}),
                json!({"name": "no slug here"}),
                json!("not an object"),
            ],
        )
        .await
        .unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(
            report.skipped,
            vec!["nav-unknown", MISSING_SLUG, MISSING_SLUG]
        );
        assert!(store.find_by_slug("nav-audi-a4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn padded_slug_is_created_once_then_updated() {
        let store = InMemoryCatalog::new();
        let blob = json!({
            "_id": "9",
            "slug": " nav-bmw-x3 ",
            "name": "Navigatie BMW X3",
            "brand": "BMW",
            "status": "active"
        });

        let first = backfill_by_slug(&store, vec![blob.clone()]).await.unwrap();
        assert_eq!(first.created, 1);

        let second = backfill_by_slug(&store, vec![blob]).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 1);

        let stored = store.find_by_slug("nav-bmw-x3").await.unwrap().unwrap();
        assert_eq!(stored.slug, "nav-bmw-x3");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn backfill_skips_invalid_merge_without_writing() {
        let store = seeded();
        let report = backfill_by_slug(&store, vec![json!({"slug": "nav-bmw-x3", "stock": "many"})])
            .await
            .unwrap();

        assert_eq!(report.updated, 0);
        assert_eq!(report.skipped, vec!["nav-bmw-x3"]);
        let product = store.find_by_slug("nav-bmw-x3").await.unwrap().unwrap();
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn load_products_json_reads_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"_id": "1", "name": "Nav BMW", "slug": "nav-bmw", "brand": "BMW", "status": "active"}}]"#
        )
        .unwrap();

        let products = load_products_json(file.path()).unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0].is_active());
    }

    #[test]
    fn load_products_json_reports_missing_file() {
        let err = load_products_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }
}
