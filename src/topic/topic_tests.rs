use super::*;
use crate::codec::DOT_SUBSTITUTE;
use crate::error::CoreError;
use crate::test_support::test_db;

#[tokio::test]
async fn test_collection_name_escapes_and_sanitizes() {
    let (_temp, db) = test_db().await;
    assert_eq!(
        collection_name(&db, "<b>safe.name</b>").unwrap(),
        format!("safe{DOT_SUBSTITUTE}name")
    );
}

#[tokio::test]
async fn test_collection_name_rejections() {
    let (_temp, db) = test_db().await;
    for bad in ["", "   ", "<i></i>", "$evil", "<b>$evil</b>"] {
        let result = collection_name(&db, bad);
        assert!(
            matches!(result, Err(CoreError::Validation(_))),
            "expected validation error for {bad:?}"
        );
    }
}

#[test]
fn test_resource_key() {
    assert_eq!(resource_key("abc123").unwrap(), "abc123");
    assert!(matches!(resource_key("$gt"), Err(CoreError::Validation(_))));
    assert!(matches!(resource_key(""), Err(CoreError::Validation(_))));
}

#[tokio::test]
async fn test_create_topic_lists_decoded_name_once() {
    let (_temp, db) = test_db().await;
    let change = create_topic(&db, "safe.name").await.unwrap();
    assert_eq!(change.name, "safe.name");
    assert_eq!(change.topics, vec!["safe.name"]);

    let topics = list_topics(&db).await.unwrap();
    assert_eq!(topics.iter().filter(|t| *t == "safe.name").count(), 1);
}

#[tokio::test]
async fn test_create_topic_with_sentinel_fails() {
    let (_temp, db) = test_db().await;
    let result = create_topic(&db, "$evil").await;
    assert!(matches!(result, Err(CoreError::Validation(_))));
    assert!(list_topics(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_existing_topic_conflicts() {
    let (_temp, db) = test_db().await;
    create_topic(&db, "rust").await.unwrap();
    let result = create_topic(&db, "rust").await;
    assert!(matches!(result, Err(CoreError::Conflict(_))));
}

#[tokio::test]
async fn test_rename_topic() {
    let (_temp, db) = test_db().await;
    create_topic(&db, "old").await.unwrap();
    let change = rename_topic(&db, "old", "new.name").await.unwrap();
    assert_eq!(change.name, "new.name");
    assert_eq!(change.topics, vec!["new.name"]);
}

#[tokio::test]
async fn test_rename_missing_topic() {
    let (_temp, db) = test_db().await;
    let result = rename_topic(&db, "ghost", "other").await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_rename_rejects_empty_target() {
    let (_temp, db) = test_db().await;
    create_topic(&db, "old").await.unwrap();
    let result = rename_topic(&db, "old", "<p></p>").await;
    assert!(matches!(result, Err(CoreError::Validation(_))));
    assert_eq!(list_topics(&db).await.unwrap(), vec!["old"]);
}

#[tokio::test]
async fn test_drop_topic() {
    let (_temp, db) = test_db().await;
    create_topic(&db, "gone").await.unwrap();
    assert!(drop_topic(&db, "gone").await.unwrap());
    assert!(!drop_topic(&db, "gone").await.unwrap());
    assert!(list_topics(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overlong_topic_name_is_validation_error() {
    let (_temp, db) = test_db().await;
    let name = "x".repeat(200);
    let result = create_topic(&db, &name).await;
    assert!(matches!(result, Err(CoreError::Validation(_))));
    assert!(list_topics(&db).await.unwrap().is_empty());
}
