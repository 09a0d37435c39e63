use super::{pull_pin, push_pin};
use crate::db::Db;
use crate::error::CoreError;
use crate::resource::{resource_filter, Resource, IS_PINNED_FIELD};
use crate::store::{Document, Update, UpdateOptions};
use crate::topic::{collection_name, resource_key};
use serde_json::Value;
use tracing::debug;

/// Flag a resource as pinned, then add it to the topic's pin index.
pub async fn pin(db: &Db, topic: &str, id: &str) -> Result<Resource, CoreError> {
    let collection = collection_name(db, topic)?;
    let key = resource_key(id)?;
    let mut fields = Document::new();
    fields.insert(IS_PINNED_FIELD.to_string(), Value::Bool(true));
    let pinned = db
        .store()
        .find_one_and_update(
            &collection,
            &resource_filter(&key),
            &Update::Set(fields),
            UpdateOptions::default(),
        )
        .await?
        .ok_or_else(|| CoreError::not_found(format!("resource {id}")))?;
    push_pin(db, &collection, &key).await?;
    debug!(topic = %topic, id = %id, "Pinned resource");
    Resource::from_document(pinned)
}

/// Clear a resource's pin flag, then drop it from the topic's pin index.
/// Unpinning a resource that is not pinned succeeds.
pub async fn unpin(db: &Db, topic: &str, id: &str) -> Result<Resource, CoreError> {
    let collection = collection_name(db, topic)?;
    let key = resource_key(id)?;
    let unpinned = db
        .store()
        .find_one_and_update(
            &collection,
            &resource_filter(&key),
            &Update::Unset(vec![IS_PINNED_FIELD.to_string()]),
            UpdateOptions::default(),
        )
        .await?
        .ok_or_else(|| CoreError::not_found(format!("resource {id}")))?;
    pull_pin(db, &collection, &key).await?;
    debug!(topic = %topic, id = %id, "Unpinned resource");
    Resource::from_document(unpinned)
}

/// Remove `id` from the topic's pin index without touching the resource.
/// Idempotent.
pub async fn pull(db: &Db, topic: &str, id: &str) -> Result<(), CoreError> {
    let collection = collection_name(db, topic)?;
    let key = resource_key(id)?;
    pull_pin(db, &collection, &key).await
}
