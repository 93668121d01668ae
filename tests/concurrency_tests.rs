//! Concurrent lookups against one shared matcher.

mod common;

use std::sync::Arc;

use common::{active, slugs, storefront_matcher};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_lookups_agree_with_sequential_ones() {
    let matcher = Arc::new(storefront_matcher());
    let queries = [("BMW", "X3 E83"), ("VW", "Golf 8"), ("Alfa Romeo", "159"), ("BMW", "X5")];

    let mut expected = Vec::new();
    for (brand, model) in queries {
        let result = matcher.match_vehicle_model(brand, model).await.unwrap();
        expected.push(slugs(&result.products).join(","));
    }

    let mut handles = Vec::new();
    for round in 0..16 {
        for (i, (brand, model)) in queries.iter().enumerate() {
            let matcher = Arc::clone(&matcher);
            let (brand, model) = (brand.to_string(), model.to_string());
            handles.push(tokio::spawn(async move {
                let result = matcher.match_vehicle_model(&brand, &model).await.unwrap();
                (round, i, slugs(&result.products).join(","))
            }));
        }
    }

    for handle in handles {
        let (round, i, got) = handle.await.unwrap();
        assert_eq!(got, expected[i], "query {i} diverged in round {round}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_placeholder_generation_is_well_formed() {
    let matcher = Arc::new(storefront_matcher());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let matcher = Arc::clone(&matcher);
            tokio::spawn(async move {
                matcher
                    .match_vehicle_model("Dacia", &format!("Model {i}"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_synthetic());
        assert_eq!(result.total_products, result.products.len());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn lookups_see_products_upserted_concurrently() {
    let matcher = Arc::new(storefront_matcher());
    let store = Arc::clone(matcher.store());

    let writer = tokio::spawn(async move {
        for i in 0..20 {
            store
                .upsert(active(
                    &format!("skoda-octavia-{i}"),
                    &format!("Navigatie Skoda Octavia {i}"),
                    "Skoda",
                ))
                .await
                .unwrap();
        }
    });

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let matcher = Arc::clone(&matcher);
            tokio::spawn(async move {
                let result = matcher.match_vehicle_model("BMW", "X3 E83").await.unwrap();
                assert_eq!(result.total_products, 2);
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }

    let octavia = matcher.match_vehicle_model("Skoda", "Octavia 7").await.unwrap();
    assert_eq!(slugs(&octavia.products), vec!["skoda-octavia-7"]);
}
