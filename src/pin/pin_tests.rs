use super::*;
use crate::error::CoreError;
use crate::resource::{self, NewResource, Resource, ResourceFields};
use crate::store::{Document, Filter, Update, UpdateOptions};
use crate::test_support::test_db;
use crate::topic::collection_name;
use serde_json::{Number, Value};
use std::collections::BTreeSet;

async fn add(db: &crate::db::Db, topic: &str, description: &str) -> Resource {
    let new = NewResource {
        fields: ResourceFields {
            description: Some(description.to_string()),
            keywords: Some(vec!["k".to_string()]),
            link: Some("https://example.com".to_string()),
        },
        created_at: Some(Number::from(1)),
    };
    resource::create(db, topic, &new).await.unwrap()
}

/// Pins recomputed from the resources' flags.
async fn scanned_pins(db: &crate::db::Db, topic: &str) -> BTreeSet<String> {
    resource::list(db, topic)
        .await
        .unwrap()
        .into_iter()
        .filter(Resource::pinned)
        .map(|r| r.id)
        .collect()
}

async fn indexed_pins(db: &crate::db::Db, topic: &str) -> BTreeSet<String> {
    pinned_ids(db, topic).await.unwrap().into_iter().collect()
}

#[tokio::test]
async fn test_pin_sets_flag_and_index() {
    let (_temp, db) = test_db().await;
    let created = add(&db, "rust", "a").await;
    let pinned = pin(&db, "rust", &created.id).await.unwrap();
    assert_eq!(pinned.is_pinned, Some(true));
    assert_eq!(pinned_ids(&db, "rust").await.unwrap(), vec![created.id.clone()]);
}

#[tokio::test]
async fn test_pin_twice_does_not_duplicate() {
    let (_temp, db) = test_db().await;
    let created = add(&db, "rust", "a").await;
    pin(&db, "rust", &created.id).await.unwrap();
    pin(&db, "rust", &created.id).await.unwrap();
    assert_eq!(pinned_ids(&db, "rust").await.unwrap(), vec![created.id.clone()]);
}

#[tokio::test]
async fn test_pin_missing_resource_leaves_index_alone() {
    let (_temp, db) = test_db().await;
    add(&db, "rust", "a").await;
    let result = pin(&db, "rust", "0123456789abcdef0123456789abcdef").await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
    assert!(pinned_ids(&db, "rust").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pin_rejects_sentinel_params() {
    let (_temp, db) = test_db().await;
    assert!(matches!(pin(&db, "$t", "abc").await, Err(CoreError::Validation(_))));
    assert!(matches!(pin(&db, "t", "$abc").await, Err(CoreError::Validation(_))));
}

#[tokio::test]
async fn test_unpin_clears_flag_and_index() {
    let (_temp, db) = test_db().await;
    let created = add(&db, "rust", "a").await;
    pin(&db, "rust", &created.id).await.unwrap();
    let unpinned = unpin(&db, "rust", &created.id).await.unwrap();
    assert!(unpinned.is_pinned.is_none());
    assert!(pinned_ids(&db, "rust").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unpin_is_idempotent() {
    let (_temp, db) = test_db().await;
    let other = add(&db, "rust", "other").await;
    let created = add(&db, "rust", "a").await;
    pin(&db, "rust", &other.id).await.unwrap();

    let first = unpin(&db, "rust", &created.id).await.unwrap();
    let second = unpin(&db, "rust", &created.id).await.unwrap();
    assert!(first.is_pinned.is_none());
    assert_eq!(first, second);
    assert_eq!(pinned_ids(&db, "rust").await.unwrap(), vec![other.id.clone()]);
}

#[tokio::test]
async fn test_unpin_missing_resource() {
    let (_temp, db) = test_db().await;
    let result = unpin(&db, "rust", "0123456789abcdef0123456789abcdef").await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_pull_absent_id_is_noop() {
    let (_temp, db) = test_db().await;
    let created = add(&db, "rust", "a").await;
    pull(&db, "rust", "never-pinned").await.unwrap();
    pin(&db, "rust", &created.id).await.unwrap();
    pull(&db, "rust", "never-pinned").await.unwrap();
    assert_eq!(pinned_ids(&db, "rust").await.unwrap(), vec![created.id.clone()]);
    pull(&db, "rust", &created.id).await.unwrap();
    pull(&db, "rust", &created.id).await.unwrap();
    assert!(pinned_ids(&db, "rust").await.unwrap().is_empty());
    // The resource flag is untouched by a bare pull.
    assert!(resource::list(&db, "rust").await.unwrap()[0].pinned());
}

#[tokio::test]
async fn test_pin_invariant_after_mixed_sequence() {
    let (_temp, db) = test_db().await;
    let a = add(&db, "rust", "a").await;
    let b = add(&db, "rust", "b").await;
    let c = add(&db, "rust", "c").await;
    pin(&db, "rust", &a.id).await.unwrap();
    pin(&db, "rust", &b.id).await.unwrap();
    pin(&db, "rust", &c.id).await.unwrap();
    unpin(&db, "rust", &b.id).await.unwrap();
    resource::update(
        &db,
        "rust",
        &a.id,
        &ResourceFields {
            description: Some("a2".to_string()),
            keywords: Some(vec!["k2".to_string()]),
            link: Some("https://example.org".to_string()),
        },
    )
    .await
    .unwrap();
    resource::delete(&db, "rust", &c.id).await.unwrap();
    let d = add(&db, "rust", "d").await;
    pin(&db, "rust", &d.id).await.unwrap();

    let scanned = scanned_pins(&db, "rust").await;
    assert_eq!(scanned, indexed_pins(&db, "rust").await);
    assert_eq!(scanned, BTreeSet::from([a.id.clone(), d.id.clone()]));
}

#[tokio::test]
async fn test_reconcile_repairs_drift() {
    let (_temp, db) = test_db().await;
    let a = add(&db, "rust", "a").await;
    let b = add(&db, "rust", "b").await;
    pin(&db, "rust", &a.id).await.unwrap();

    // Simulate a crash between the two steps of `pin(b)` and of `unpin(a)`.
    let collection = collection_name(&db, "rust").unwrap();
    let mut flag = Document::new();
    flag.insert("isPinned".to_string(), Value::Bool(true));
    db.store()
        .find_one_and_update(&collection, &Filter::id(&b.id), &Update::Set(flag), UpdateOptions::default())
        .await
        .unwrap();
    db.store()
        .find_one_and_update(
            &collection,
            &Filter::id(&a.id),
            &Update::Unset(vec!["isPinned".to_string()]),
            UpdateOptions::default(),
        )
        .await
        .unwrap();
    assert_ne!(scanned_pins(&db, "rust").await, indexed_pins(&db, "rust").await);

    let repaired = reconcile_pins(&db, "rust").await.unwrap();
    assert_eq!(repaired, vec![b.id.clone()]);
    assert_eq!(scanned_pins(&db, "rust").await, indexed_pins(&db, "rust").await);
}

#[tokio::test]
async fn test_reconcile_missing_topic() {
    let (_temp, db) = test_db().await;
    assert!(matches!(reconcile_pins(&db, "ghost").await, Err(CoreError::NotFound(_))));
}
