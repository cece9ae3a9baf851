//! Reviewed object repository integration tests
//!
//! Cover the (object_type, object_id) uniqueness rule, JSONB metadata
//! round-trips, and the shared CRUD contracts.

mod common;

use serde_json::json;
use uuid::Uuid;

use review_store::db::models::{NewReviewedObject, ReviewedObjectPatch};
use review_store::db::repository::reviewed_objects;
use review_store::StoreError;

use common::{cleanup, test_pool, unique};

fn new_object(object_type: &str, external_id: &str) -> NewReviewedObject {
    NewReviewedObject {
        object_type: object_type.to_string(),
        object_id: external_id.to_string(),
        object_name: "Mario's Pizzeria".to_string(),
        object_description: Some("Wood-fired pizza downtown".to_string()),
        object_metadata: None,
    }
}

/// JSONB metadata survives a create and a re-read unchanged
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_with_metadata_round_trip() {
    let pool = test_pool().await;
    let metadata = json!({"cuisine": "italian", "price_range": "$$", "seats": 42});

    let mut object = new_object(&unique("type"), &unique("ext"));
    object.object_metadata = Some(metadata.clone());

    let created = reviewed_objects::create(&pool, &object)
        .await
        .expect("create should succeed");
    assert_eq!(created.object_metadata.as_ref(), Some(&metadata));

    let reread = reviewed_objects::get_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("object should exist");
    assert_eq!(reread.object_metadata, Some(metadata));
    assert_eq!(reread.object_name, "Mario's Pizzeria");

    cleanup(&pool, &[], &[created.id]).await;
}

/// The same external id is rejected within a type but fine across types
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_type_and_external_id_uniqueness() {
    let pool = test_pool().await;
    let object_type = unique("type");
    let other_type = unique("type");
    let external_id = unique("ext");

    let first = reviewed_objects::create(&pool, &new_object(&object_type, &external_id))
        .await
        .expect("first create should succeed");

    let err = reviewed_objects::create(&pool, &new_object(&object_type, &external_id))
        .await
        .expect_err("duplicate (type, id) pair should be rejected");
    match &err {
        StoreError::ConstraintViolation { constraint, .. } => {
            assert_eq!(constraint.as_deref(), Some("uq_object_type_id"));
        }
        other => panic!("expected ConstraintViolation, got {other:?}"),
    }

    // Same external id under a different type is a different object
    let cross = reviewed_objects::create(&pool, &new_object(&other_type, &external_id))
        .await
        .expect("same external id under another type should succeed");

    let found = reviewed_objects::get_by_type_and_id(&pool, &object_type, &external_id)
        .await
        .unwrap()
        .expect("pair lookup should find the first object");
    assert_eq!(found.id, first.id);

    cleanup(&pool, &[], &[first.id, cross.id]).await;
}

/// Pair lookup returns None when nothing matches
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_by_type_and_id_absent_returns_none() {
    let pool = test_pool().await;

    let found = reviewed_objects::get_by_type_and_id(&pool, &unique("no"), &unique("no"))
        .await
        .unwrap();
    assert!(found.is_none());
}

/// Pages over a dedicated type partition its objects exactly once
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_by_type_pagination_partition() {
    let pool = test_pool().await;
    let object_type = unique("page");

    let mut ids = Vec::new();
    for _ in 0..3 {
        let row = reviewed_objects::create(&pool, &new_object(&object_type, &unique("ext")))
            .await
            .unwrap();
        ids.push(row.id);
    }

    let page1 = reviewed_objects::get_by_type(&pool, &object_type, 0, 2)
        .await
        .unwrap();
    let page2 = reviewed_objects::get_by_type(&pool, &object_type, 2, 2)
        .await
        .unwrap();

    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 1);

    let mut seen: Vec<Uuid> = page1.iter().chain(page2.iter()).map(|r| r.id).collect();
    seen.sort();
    let mut expected = ids.clone();
    expected.sort();
    assert_eq!(seen, expected, "pages must cover every object exactly once");

    cleanup(&pool, &[], &ids).await;
}

/// A partial update touches only the supplied fields; explicit null clears
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_partial_update_semantics() {
    let pool = test_pool().await;

    let created = reviewed_objects::create(&pool, &new_object(&unique("type"), &unique("ext")))
        .await
        .unwrap();

    let patch = ReviewedObjectPatch {
        object_name: Some("Mario's Trattoria".to_string()),
        ..Default::default()
    };
    let renamed = reviewed_objects::update(&pool, created.id, patch)
        .await
        .unwrap()
        .expect("row should exist");
    assert_eq!(renamed.object_name, "Mario's Trattoria");
    assert_eq!(renamed.object_type, created.object_type);
    assert_eq!(renamed.object_description, created.object_description);
    assert_eq!(renamed.created_at, created.created_at);
    assert!(renamed.updated_at >= created.updated_at);

    let patch = ReviewedObjectPatch {
        object_description: Some(None),
        object_metadata: Some(Some(serde_json::json!({"renovated": true}))),
        ..Default::default()
    };
    let cleared = reviewed_objects::update(&pool, created.id, patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.object_description, None);
    assert_eq!(
        cleared.object_metadata,
        Some(serde_json::json!({"renovated": true}))
    );
    assert_eq!(cleared.object_name, "Mario's Trattoria");

    cleanup(&pool, &[], &[created.id]).await;
}

/// Update of a missing id returns None
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_update_missing_id_returns_none() {
    let pool = test_pool().await;

    let patch = ReviewedObjectPatch {
        object_name: Some("Nobody".to_string()),
        ..Default::default()
    };
    let result = reviewed_objects::update(&pool, Uuid::new_v4(), patch)
        .await
        .unwrap();
    assert!(result.is_none());
}

/// Delete returns false for missing rows, true once, then false again
#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_contract() {
    let pool = test_pool().await;

    assert!(!reviewed_objects::delete(&pool, Uuid::new_v4()).await.unwrap());

    let row = reviewed_objects::create(&pool, &new_object(&unique("type"), &unique("ext")))
        .await
        .unwrap();

    assert!(reviewed_objects::delete(&pool, row.id).await.unwrap());
    assert!(reviewed_objects::get_by_id(&pool, row.id)
        .await
        .unwrap()
        .is_none());
    assert!(!reviewed_objects::delete(&pool, row.id).await.unwrap());
}
