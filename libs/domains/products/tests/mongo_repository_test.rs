//! MongoProductRepository against a real MongoDB (testcontainers).
//!
//! Run with `cargo test -p domain_products -- --ignored` (requires Docker).

use domain_products::*;
use serde_json::json;
use test_utils::{TestDataBuilder, TestMongo};

fn input(id: &str, likes: i64, tag: &str) -> CreateProduct {
    serde_json::from_value(json!({
        "_id": id,
        "likes": likes,
        "urls": { "regular": "r", "small": "s", "thumb": "t" },
        "links": { "self": "a", "html": "b" },
        "user": { "id": "u1", "first_name": "Ada", "username": "ada" },
        "tags": [{ "title": tag }]
    }))
    .unwrap()
}

async fn repository(mongo: &TestMongo, test_name: &str) -> MongoProductRepository {
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_mongo_list_sorted_paged_and_tagged() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_list").await;

    // Insert out of order; listing must come back by ascending _id.
    for i in (0..12).rev() {
        let tag = if i % 3 == 0 { "fizz" } else { "plain" };
        repo.create(input(&format!("p{:02}", i), i, tag)).await.unwrap();
    }

    let page = repo
        .list(ProductFilter::default().page(10, 5))
        .await
        .unwrap();
    let ids: Vec<_> = page.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p10", "p11"]);

    let fizz = repo
        .list(ProductFilter::default().with_tag("fizz"))
        .await
        .unwrap();
    assert_eq!(fizz.len(), 4);
    assert!(fizz.iter().all(|p| p.has_tag("fizz")));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_mongo_create_duplicate_and_missing_fields() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "mongo_create").await;

    repo.create(input("dup", 1, "x")).await.unwrap();
    let duplicate = repo.create(input("dup", 2, "x")).await;
    assert!(matches!(duplicate, Err(ProductError::Duplicate(_))));

    let mut missing = input("no-user", 1, "x");
    missing.user = None;
    let result = repo.create(missing).await;
    assert!(matches!(result, Err(ProductError::Validation(_))));
    assert!(!repo.exists("no-user").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_mongo_edit_and_destroy_through_service() {
    let mongo = TestMongo::new().await;
    let service = ProductService::new(repository(&mongo, "mongo_service").await);

    service.create_product(input("p1", 5, "x")).await.unwrap();

    let updated = service
        .update_product(
            "p1",
            UpdateProduct {
                likes: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.likes, 0);

    let stored = service.get_product("p1").await.unwrap().unwrap();
    assert_eq!(stored, updated);

    service.delete_product("p1").await.unwrap();
    assert!(service.get_product("p1").await.unwrap().is_none());
    assert!(matches!(
        service.delete_product("p1").await,
        Err(ProductError::NotFound(_))
    ));
}
