use super::types::{resource_filter, resources_only};
use super::validate::{validate_created_at, validate_fields};
use super::{NewResource, Resource, ResourceFields, CREATED_AT_FIELD};
use crate::db::Db;
use crate::error::CoreError;
use crate::pin::pull_pin;
use crate::store::{Sort, Update, UpdateOptions};
use crate::topic::{collection_name, resource_key};
use serde_json::Value;
use tracing::{debug, info};

/// Every resource in `topic`, newest first.
pub async fn list(db: &Db, topic: &str) -> Result<Vec<Resource>, CoreError> {
    let collection = collection_name(db, topic)?;
    let keep = resources_only();
    let documents = db
        .store()
        .find(&collection, Some(&Sort::descending(CREATED_AT_FIELD)))
        .await?;
    documents
        .into_iter()
        .filter(|document| keep.matches(document))
        .map(Resource::from_document)
        .collect()
}

/// Validate and insert a new resource. The result is never pinned.
pub async fn create(db: &Db, topic: &str, new: &NewResource) -> Result<Resource, CoreError> {
    let collection = collection_name(db, topic)?;
    let created_at = validate_created_at(new.created_at.as_ref())?;
    let fields = validate_fields(db, &new.fields)?;
    let mut document = fields.to_document();
    document.insert(CREATED_AT_FIELD.to_string(), Value::Number(created_at));
    let stored = db.store().insert_one(&collection, document).await?;
    let resource = Resource::from_document(stored)?;
    info!(topic = %topic, id = %resource.id, "Created resource");
    Ok(resource)
}

/// Replace description, keywords and link of an existing resource. The id,
/// creation time and pin flag are left alone.
pub async fn update(
    db: &Db,
    topic: &str,
    id: &str,
    fields: &ResourceFields,
) -> Result<Resource, CoreError> {
    let collection = collection_name(db, topic)?;
    let key = resource_key(id)?;
    let fields = validate_fields(db, fields)?;
    let updated = db
        .store()
        .find_one_and_update(
            &collection,
            &resource_filter(&key),
            &Update::Set(fields.to_document()),
            UpdateOptions::default(),
        )
        .await?
        .ok_or_else(|| CoreError::not_found(format!("resource {id}")))?;
    debug!(topic = %topic, id = %id, "Updated resource");
    Resource::from_document(updated)
}

/// Remove a resource and drop its id from the topic's pin index.
pub async fn delete(db: &Db, topic: &str, id: &str) -> Result<Resource, CoreError> {
    let collection = collection_name(db, topic)?;
    let key = resource_key(id)?;
    let deleted = db
        .store()
        .find_one_and_delete(&collection, &resource_filter(&key))
        .await?
        .ok_or_else(|| CoreError::not_found(format!("resource {id}")))?;
    pull_pin(db, &collection, &key).await?;
    info!(topic = %topic, id = %id, "Deleted resource");
    Resource::from_document(deleted)
}
