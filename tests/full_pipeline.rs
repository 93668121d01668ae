//! Configuration file to lookup, through each catalog backend.

mod common;

use navcompat::{
    NavcompatConfig, ProductStatus, backfill_by_slug, load_blobs_json, matcher_from_config,
    open_catalog,
};
use std::fs;

fn write_seed(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("catalog.json");
    fs::write(&path, serde_json::to_vec(&common::storefront()).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn yaml_config_with_memory_backend_serves_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let seed = write_seed(&dir);
    let yaml = format!(
        "version: \"1.0\"\ncatalog:\n  backend: memory\n  seed_file: \"{seed}\"\nmatcher:\n  fallback:\n    require_known_brand: true\n"
    );
    let cfg = NavcompatConfig::from_yaml(&yaml).unwrap();
    let matcher = matcher_from_config(&cfg).await.unwrap();

    let real = matcher.match_vehicle_model("BMW", "X3 E83").await.unwrap();
    assert_eq!(common::slugs(&real.products), vec!["bmw-e83-x3-reversed", "bmw-x3-e83"]);

    // Unknown brand with require_known_brand: valid but empty.
    let unknown = matcher.match_vehicle_model("Trabant", "601").await.unwrap();
    assert_eq!(unknown.total_products, 0);
    assert!(unknown.products.is_empty());

    // Known brand, unknown model: placeholders still fire.
    let placeholder = matcher.match_vehicle_model("BMW", "Z4").await.unwrap();
    assert!(placeholder.is_synthetic());
}

#[tokio::test]
async fn lookups_never_write_placeholders_into_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = NavcompatConfig::default();
    cfg.catalog.seed_file = Some(write_seed(&dir));

    let store = open_catalog(&cfg.catalog).await.unwrap();
    let before = store.list_brands().await.unwrap();
    let matcher = navcompat::build_matcher(&cfg, store.clone()).unwrap();

    let result = matcher.match_vehicle_model("Dacia", "Logan").await.unwrap();
    assert!(result.is_synthetic());
    for product in &result.products {
        assert!(store.find_by_slug(&product.slug).await.unwrap().is_none());
    }
    assert_eq!(store.list_brands().await.unwrap(), before);
}

#[cfg(feature = "backend-redb")]
#[tokio::test]
async fn redb_backfill_then_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("catalog.redb");
    let yaml = format!(
        "version: \"1.0\"\ncatalog:\n  backend: redb\n  redb_path: \"{}\"\n  seed_file: \"{}\"\n",
        db.display(),
        write_seed(&dir)
    );
    let cfg = NavcompatConfig::from_yaml(&yaml).unwrap();
    let store = open_catalog(&cfg.catalog).await.unwrap();

    let blobs_path = dir.path().join("blobs.json");
    fs::write(
        &blobs_path,
        r#"[
  {"slug": "bmw-x3-draft", "status": "active", "price": 1099},
  {"slug": "bmw-x5-e70", "status": "inactive"},
  {"slug": "seat-leon-3", "_id": "s3", "name": "Navigatie Seat Leon 3", "brand": "Seat", "status": "active"},
  {"name": "no slug here"}
]"#,
    )
    .unwrap();

    let report = backfill_by_slug(store.as_ref(), load_blobs_json(&blobs_path).unwrap())
        .await
        .unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped.len(), 1);

    let promoted = store.find_by_slug("bmw-x3-draft").await.unwrap().unwrap();
    assert_eq!(promoted.status, ProductStatus::Active);
    assert_eq!(promoted.price, 1099.0);
    drop(store);

    // Reopen from disk and match against the backfilled catalog.
    let cfg = NavcompatConfig::from_yaml(&format!(
        "version: \"1.0\"\ncatalog:\n  backend: redb\n  redb_path: \"{}\"\n",
        db.display()
    ))
    .unwrap();
    let matcher = matcher_from_config(&cfg).await.unwrap();

    let x3 = matcher.match_vehicle_model("BMW", "X3 E83").await.unwrap();
    assert_eq!(
        common::slugs(&x3.products),
        vec!["bmw-e83-x3-reversed", "bmw-x3-draft", "bmw-x3-e83"]
    );

    let x5 = matcher.match_vehicle_model("BMW", "X5 E70").await.unwrap();
    assert!(x5.is_synthetic(), "deactivated product no longer matches");

    let leon = matcher.match_vehicle_model("Seat", "Leon").await.unwrap();
    assert_eq!(common::slugs(&leon.products), vec!["seat-leon-3"]);
}
